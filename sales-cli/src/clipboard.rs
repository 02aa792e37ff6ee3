//! Clipboard sink that pipes the summary into an external command.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use sales_core::Clipboard;
use tracing::{debug, warn};

/// Pipes text into a clipboard program such as `pbcopy` or `wl-copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Splits a command line on whitespace. Returns `None` for a blank command.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn pipe(
        &self,
        text: &str,
    ) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // stdin is dropped before waiting so the program sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when the write failed.
        let status = child.wait()?;
        written?;
        if !status.success() {
            return Err(io::Error::other(format!("exited with {status}")));
        }
        Ok(())
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(
        &self,
        text: &str,
    ) {
        match self.pipe(text) {
            Ok(()) => debug!(program = %self.program, bytes = text.len(), "clipboard updated"),
            Err(error) => warn!(program = %self.program, %error, "clipboard command failed"),
        }
    }
}
