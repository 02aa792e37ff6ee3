use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use sales_core::calculations::common::display_amount;
use sales_core::{AccountBook, Clipboard, Profile, SalesSession};
use tracing::info;

use crate::csv_loader::{self, CsvLoadError, SalesRow};
use crate::utils::parse_assignment;

/// Renders every profile with its default row.
pub fn profiles_table() -> String {
    let header = format!(
        "{:<12} {:<16} {:>9} {:>9} {:>8} {:>8} {:>6}",
        "profile", "variant", "base", "battery", "subsidy", "lead", "share"
    );
    let rows = Profile::ALL.iter().map(|profile| {
        let d = profile.defaults();
        format!(
            "{:<12} {:<16} {:>9} {:>9} {:>8} {:>8} {:>5}%",
            profile.id(),
            format!("{:?}", profile.variant()),
            display_amount(d.base_rate),
            display_amount(d.battery_unit_price),
            display_amount(d.subsidy_amount),
            display_amount(d.lead_fee),
            d.consultant_share.percent()
        )
    });

    std::iter::once(header)
        .chain(rows)
        .map(|line| line + "\n")
        .collect()
}

/// Picks the session profile.
///
/// A login, when given, takes precedence and must succeed. Otherwise the
/// profile identifier is resolved, falling back to the default profile.
pub fn select_profile(
    profile_id: Option<&str>,
    login: Option<(&str, &str)>,
    accounts: &AccountBook,
) -> Result<Profile> {
    if let Some((user, password)) = login {
        return match accounts.login(user, password) {
            Some(profile) => Ok(profile),
            None => bail!("invalid credentials for '{}'", user.trim()),
        };
    }
    Ok(Profile::resolve(profile_id))
}

/// Builds a session and applies `field=value` assignments in order.
pub fn build_session(
    profile: Profile,
    assignments: &[String],
) -> Result<SalesSession> {
    let mut session = SalesSession::new(profile);
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment)
            .with_context(|| format!("cannot apply '{assignment}'"))?;
        session
            .update(field, value)
            .with_context(|| format!("cannot apply '{assignment}'"))?;
    }
    Ok(session)
}

/// Results block followed by the summary for `date`.
pub fn render_report(
    session: &SalesSession,
    date: NaiveDate,
) -> String {
    format!(
        "{}\n\n{}\n",
        session.results(),
        session.summary(date)
    )
}

/// Sends the session's summary to `clipboard` and returns it.
pub fn copy_to_clipboard(
    session: &SalesSession,
    clipboard: &dyn Clipboard,
) -> String {
    let text = session.copy_summary(clipboard);
    info!(profile = %session.profile(), "summary sent to clipboard");
    text
}

/// Renders one summary per CSV row.
pub fn batch_summaries<R: Read>(
    profile: Profile,
    reader: R,
    date: NaiveDate,
) -> Result<Vec<String>, CsvLoadError> {
    summarize_rows(profile, &csv_loader::load_from_reader(reader)?, date)
}

/// Renders one summary per row of the CSV file at `path`.
pub fn batch_file(
    profile: Profile,
    path: &Path,
    date: NaiveDate,
) -> Result<Vec<String>, CsvLoadError> {
    summarize_rows(profile, &csv_loader::load_from_file(path)?, date)
}

fn summarize_rows(
    profile: Profile,
    rows: &[SalesRow],
    date: NaiveDate,
) -> Result<Vec<String>, CsvLoadError> {
    rows.iter()
        .map(|row| Ok(row.to_session(profile)?.summary(date)))
        .collect()
}
