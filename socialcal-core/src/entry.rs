//! Validation and normalization of user-entered birthdays.
//!
//! The store accepts whatever it is given; these rules run before a
//! record is handed to a provider.

use crate::birthday::NewBirthday;
use crate::error::{SocialCalError, SocialCalResult};
use crate::month::month_config;

const PROFILE_URL_PREFIXES: [&str; 4] = [
    "https://x.com/",
    "http://x.com/",
    "https://twitter.com/",
    "http://twitter.com/",
];

impl NewBirthday {
    /// Build a birthday from raw form input.
    ///
    /// `month_index` is 0-based; `day_index` must fit the month's column.
    pub fn parse(
        name: &str,
        handle: &str,
        month_index: u32,
        day_index: u32,
    ) -> SocialCalResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SocialCalError::InvalidEntry("Please enter a name".into()));
        }

        if handle.trim().is_empty() {
            return Err(SocialCalError::InvalidEntry("Please enter a handle".into()));
        }

        let handle = normalize_handle(handle);
        if handle.is_empty() {
            return Err(SocialCalError::InvalidEntry(
                "Handle must contain more than a prefix".into(),
            ));
        }

        let month = month_config(month_index).ok_or_else(|| {
            SocialCalError::InvalidEntry(format!("Invalid month index {month_index}"))
        })?;

        if !(1..=month.days).contains(&day_index) {
            return Err(SocialCalError::InvalidEntry(format!(
                "{} has no day {}",
                month.name, day_index
            )));
        }

        Ok(NewBirthday {
            name: name.to_string(),
            handle,
            month_index,
            day_index,
        })
    }
}

/// Strip a leading `@` and any x.com / twitter.com profile URL prefix.
pub fn normalize_handle(raw: &str) -> String {
    let mut handle = raw.trim();
    handle = handle.strip_prefix('@').unwrap_or(handle);

    for prefix in PROFILE_URL_PREFIXES {
        if let Some(rest) = handle.strip_prefix(prefix) {
            handle = rest;
            break;
        }
    }

    handle.trim_end_matches('/').to_string()
}
