//! "Next celebration" calculation.
//!
//! `today` is always passed in; nothing here reads the clock.

use chrono::{Datelike, Duration, NaiveDate};

use crate::birthday::Birthday;
use crate::store::BirthdayStore;

/// A record together with the number of days until it next comes around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextBirthday<'a> {
    pub birthday: &'a Birthday,
    pub days_away: i64,
}

impl NextBirthday<'_> {
    pub fn is_today(&self) -> bool {
        self.days_away == 0
    }

    /// Badge text: "TODAY" or e.g. "12d".
    pub fn countdown_label(&self) -> String {
        if self.is_today() {
            "TODAY".to_string()
        } else {
            format!("{}d", self.days_away)
        }
    }
}

/// Date a `(month_index, day_index)` pair lands on in `year`.
///
/// Out-of-range days spill into the following month the way day
/// arithmetic from the 1st would (February 30 in 2024 is March 1), and
/// month indices past 11 carry into later years. Returns `None` only when
/// the result falls outside chrono's representable range.
pub fn occurrence(year: i32, month_index: u32, day_index: u32) -> Option<NaiveDate> {
    let year = year.checked_add((month_index / 12) as i32)?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month_index % 12 + 1, 1)?;
    first_of_month.checked_add_signed(Duration::days(i64::from(day_index) - 1))
}

/// Days from `today` until the record's next occurrence, counting today as 0.
fn days_until(today: NaiveDate, birthday: &Birthday) -> Option<i64> {
    let mut candidate = occurrence(today.year(), birthday.month_index, birthday.day_index)?;

    if candidate < today {
        // roll the landed-on calendar day, not the raw indices
        candidate = occurrence(today.year() + 1, candidate.month0(), candidate.day())?;
    }

    Some((candidate - today).num_days())
}

/// Every record with its days-away, nearest first. Ties keep insertion order.
pub fn upcoming(today: NaiveDate, store: &BirthdayStore) -> Vec<NextBirthday<'_>> {
    let mut all: Vec<NextBirthday> = store
        .all()
        .iter()
        .filter_map(|birthday| {
            days_until(today, birthday).map(|days_away| NextBirthday { birthday, days_away })
        })
        .collect();

    all.sort_by_key(|next| next.days_away);
    all
}

/// The record whose next occurrence is closest to `today` (today included).
///
/// Returns `None` for an empty store. Among equally distant records the
/// earliest inserted wins.
pub fn next_birthday(today: NaiveDate, store: &BirthdayStore) -> Option<NextBirthday<'_>> {
    store
        .all()
        .iter()
        .filter_map(|birthday| {
            days_until(today, birthday).map(|days_away| NextBirthday { birthday, days_away })
        })
        .min_by_key(|next| next.days_away)
}
