//! In-memory birthday collection for the current session.
//!
//! Records keep insertion order. A `(month, day)` index backs `by_day`
//! so rendering a full year grid does not rescan the list per cell.
//! Mutations are not internally synchronized; callers that share a
//! store across threads must serialize writers themselves.

use std::collections::HashMap;

use crate::birthday::Birthday;

type DayKey = (u32, u32);

#[derive(Debug, Clone, Default)]
pub struct BirthdayStore {
    records: Vec<Birthday>,
    by_day: HashMap<DayKey, Vec<usize>>,
}

impl BirthdayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a provider snapshot, keeping its order.
    pub fn from_snapshot(snapshot: Vec<Birthday>) -> Self {
        let mut store = Self::new();
        store.replace_all(snapshot);
        store
    }

    /// Append a record. Ids are not checked for uniqueness.
    pub fn insert(&mut self, birthday: Birthday) {
        let position = self.records.len();
        self.by_day
            .entry((birthday.month_index, birthday.day_index))
            .or_default()
            .push(position);
        self.records.push(birthday);
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.by_day.clear();
    }

    /// Swap in a full replacement snapshot pushed by a provider.
    pub fn replace_all(&mut self, snapshot: Vec<Birthday>) {
        self.clear();
        for birthday in snapshot {
            self.insert(birthday);
        }
    }

    /// Remove the first record with this id, keeping the others in order.
    pub fn remove(&mut self, id: &str) -> Option<Birthday> {
        let position = self.records.iter().position(|b| b.id == id)?;
        let removed = self.records.remove(position);
        self.reindex();
        Some(removed)
    }

    fn reindex(&mut self) {
        self.by_day.clear();
        for (position, birthday) in self.records.iter().enumerate() {
            self.by_day
                .entry((birthday.month_index, birthday.day_index))
                .or_default()
                .push(position);
        }
    }

    /// Case-insensitive substring match on name or handle.
    /// An empty query returns every record in insertion order.
    pub fn search(&self, query: &str) -> Vec<&Birthday> {
        if query.is_empty() {
            return self.records.iter().collect();
        }

        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|b| {
                b.name.to_lowercase().contains(&needle) || b.handle.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Records pinned to exactly this `(month_index, day_index)` cell.
    pub fn by_day(&self, month_index: u32, day_index: u32) -> Vec<&Birthday> {
        self.by_day
            .get(&(month_index, day_index))
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    pub fn count_in_month(&self, month_index: u32) -> usize {
        self.records
            .iter()
            .filter(|b| b.month_index == month_index)
            .count()
    }

    pub fn get(&self, id: &str) -> Option<&Birthday> {
        self.records.iter().find(|b| b.id == id)
    }

    pub fn all(&self) -> &[Birthday] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
