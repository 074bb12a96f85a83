//! Keeps a `BirthdayStore` in step with a provider.
//!
//! Snapshots flow one way: the provider publishes a full list and the
//! session swaps it into the store. Writes go to the provider first and
//! show up in the store once the resulting snapshot is applied.

use tokio::sync::watch;

use crate::birthday::{Birthday, NewBirthday};
use crate::error::{SocialCalError, SocialCalResult};
use crate::provider::PersistenceProvider;
use crate::store::BirthdayStore;

pub struct Session {
    store: BirthdayStore,
    provider: Box<dyn PersistenceProvider>,
    updates: watch::Receiver<Vec<Birthday>>,
}

impl Session {
    /// Subscribe to the provider and load its initial snapshot.
    pub async fn open(provider: Box<dyn PersistenceProvider>) -> SocialCalResult<Self> {
        let mut updates = provider.subscribe();
        let initial = provider.load().await?;
        updates.mark_unchanged();

        tracing::debug!(provider = provider.name(), count = initial.len(), "session opened");

        Ok(Session {
            store: BirthdayStore::from_snapshot(initial),
            provider,
            updates,
        })
    }

    pub fn store(&self) -> &BirthdayStore {
        &self.store
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Apply the latest pushed snapshot, if any. Returns whether the store changed.
    pub fn sync(&mut self) -> bool {
        if !self.updates.has_changed().unwrap_or(false) {
            return false;
        }

        self.apply_latest();
        true
    }

    fn apply_latest(&mut self) {
        let snapshot = self.updates.borrow_and_update().clone();
        tracing::debug!(count = snapshot.len(), "applying snapshot");
        self.store.replace_all(snapshot);
    }

    /// Wait for the provider to push a new snapshot, then apply it.
    pub async fn wait_for_update(&mut self) -> SocialCalResult<()> {
        self.updates
            .changed()
            .await
            .map_err(|_| SocialCalError::Provider("provider stopped publishing updates".into()))?;
        // changed() already marked the value seen, so sync() would skip it
        self.apply_latest();
        Ok(())
    }

    pub async fn add(&mut self, birthday: NewBirthday) -> SocialCalResult<Birthday> {
        let created = self.provider.create(birthday).await?;
        self.sync();
        Ok(created)
    }

    /// Delete by id. The provider decides whether the id exists; the
    /// returned record is the local copy, absent if the store was stale.
    pub async fn remove(&mut self, id: &str) -> SocialCalResult<Option<Birthday>> {
        let existing = self.store.get(id).cloned();

        self.provider.delete(id).await?;
        self.sync();
        Ok(existing)
    }

    pub async fn clear_all(&mut self) -> SocialCalResult<()> {
        self.provider.delete_all().await?;
        self.sync();
        Ok(())
    }
}
