use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use sales_cli::app;
use sales_cli::clipboard::CommandClipboard;
use sales_cli::config::AppConfig;
use sales_cli::logging::init_logging;
use sales_core::AccountBook;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Solar sales commission calculator.
///
/// Works out system size, equipment cost, break-even price per watt and the
/// consultant's commission for a sale, then prints a summary ready to paste.
#[derive(Debug, Parser)]
#[command(name = "salescut", version)]
struct Cli {
    /// Config file. Defaults to `salescut.toml` in the working directory
    /// when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the sales profiles and their default values.
    Profiles,

    /// Calculate a single sale.
    Calc {
        /// Profile identifier (e.g. `Horizon`, `RR-Advisor`). Unknown values
        /// use the default profile.
        #[arg(long)]
        profile: Option<String>,

        /// Log in with an account instead of naming the profile.
        #[arg(long, requires = "password")]
        user: Option<String>,

        #[arg(long, requires = "user")]
        password: Option<String>,

        /// Input assignment, repeatable (e.g. `--set panel_count=10`).
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Also pipe the summary into the configured clipboard command.
        #[arg(long)]
        copy: bool,
    },

    /// Print one summary per row of a CSV file.
    Batch {
        #[arg(long)]
        profile: Option<String>,

        /// CSV file whose columns are input field names.
        #[arg(long)]
        file: PathBuf,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_env_accounts(AccountBook::from_env());
    init_logging(&config.logging)?;
    debug!(accounts = config.accounts.len(), "configuration ready");

    match cli.command {
        Command::Profiles => print!("{}", app::profiles_table()),

        Command::Calc {
            profile,
            user,
            password,
            set,
            copy,
        } => {
            let login = user.as_deref().zip(password.as_deref());
            let profile = app::select_profile(profile.as_deref(), login, &config.accounts)?;
            info!(%profile, "calculating sale");

            let session = app::build_session(profile, &set)?;
            println!("{}", app::render_report(&session, Local::now().date_naive()));

            if copy {
                let Some(clipboard) = config
                    .clipboard
                    .command
                    .as_deref()
                    .and_then(CommandClipboard::from_command_line)
                else {
                    bail!("--copy needs a [clipboard] command in the config file");
                };
                app::copy_to_clipboard(&session, &clipboard);
            }
        }

        Command::Batch { profile, file } => {
            let profile = app::select_profile(profile.as_deref(), None, &config.accounts)?;
            let summaries = app::batch_file(profile, &file, Local::now().date_naive())
                .with_context(|| format!("failed to process '{}'", file.display()))?;
            info!(%profile, rows = summaries.len(), "batch complete");

            println!("{}", summaries.join("\n\n"));
        }
    }

    Ok(())
}
