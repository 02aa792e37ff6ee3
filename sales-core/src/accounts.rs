//! Static credential table mapping sign-in names to profiles.
//!
//! This is a plain lookup, not a security boundary: credentials are held in
//! memory as configured and compared verbatim after trimming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Profile;

/// Profiles whose credentials can be sourced from the environment, in the
/// order [`AccountBook::login`] checks them.
const ACCOUNT_PROFILES: [Profile; 4] = [
    Profile::RrAdvisor,
    Profile::Horizon,
    Profile::Elias,
    Profile::JRamos,
];

/// One sign-in entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user: String,
    pub password: String,
}

/// Credential table keyed by profile identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountBook {
    accounts: BTreeMap<String, Account>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the account for `profile_id`.
    pub fn insert(
        &mut self,
        profile_id: impl Into<String>,
        account: Account,
    ) {
        self.accounts.insert(profile_id.into(), account);
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Builds a table from `SALESCUT_<NAME>_USER` / `SALESCUT_<NAME>_PASSWORD`
    /// variables, where `<NAME>` is the profile id upper-cased with `-`
    /// replaced by `_` (`RR-Advisor` → `RR_ADVISOR`).
    ///
    /// Profiles with no user variable set are skipped.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a table the way [`AccountBook::from_env`] does, reading
    /// variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut book = Self::new();
        for profile in ACCOUNT_PROFILES {
            let name = profile.id().to_uppercase().replace('-', "_");
            let Some(user) = lookup(&format!("SALESCUT_{name}_USER")) else {
                continue;
            };
            let password = lookup(&format!("SALESCUT_{name}_PASSWORD")).unwrap_or_default();
            book.insert(profile.id(), Account { user, password });
        }
        debug!(accounts = book.len(), "loaded accounts from environment");
        book
    }

    /// Adds every entry of `other` whose profile id is not present yet.
    pub fn merge_missing(
        &mut self,
        other: AccountBook,
    ) {
        for (profile_id, account) in other.accounts {
            self.accounts.entry(profile_id).or_insert(account);
        }
    }

    /// Returns the profile whose credentials match, if any.
    ///
    /// Both inputs are trimmed. Blank credentials never match. When several
    /// entries share credentials, the first in RR-Advisor, Horizon, Elias,
    /// JRamos order wins, then any other profile ids alphabetically.
    ///
    /// ```
    /// use sales_core::{Account, AccountBook, Profile};
    ///
    /// let mut book = AccountBook::new();
    /// book.insert("Horizon", Account { user: "hz".into(), password: "pw".into() });
    ///
    /// assert_eq!(book.login(" hz ", "pw"), Some(Profile::Horizon));
    /// assert_eq!(book.login("hz", "nope"), None);
    /// ```
    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Option<Profile> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            warn!("login attempted with blank credentials");
            return None;
        }

        let matched = self
            .accounts
            .iter()
            .filter(|(_, account)| account.user == username && account.password == password)
            .min_by_key(|(profile_id, _)| login_rank(profile_id))
            .map(|(profile_id, _)| Profile::resolve(Some(profile_id.as_str())));

        match matched {
            Some(profile) => debug!(%profile, "login accepted"),
            None => warn!(user = username, "login rejected"),
        }
        matched
    }
}

/// Position of `profile_id` in the login order; unknown ids sort last.
fn login_rank(profile_id: &str) -> usize {
    ACCOUNT_PROFILES
        .iter()
        .position(|profile| profile.id() == profile_id)
        .unwrap_or(ACCOUNT_PROFILES.len())
}
