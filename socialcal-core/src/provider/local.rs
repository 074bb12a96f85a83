//! Local fallback provider backed by a single JSON file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::birthday::{Birthday, NewBirthday};
use crate::error::{SocialCalError, SocialCalResult};
use crate::provider::PersistenceProvider;

const BIRTHDAYS_FILE: &str = "birthdays.json";

pub struct LocalFileProvider {
    path: PathBuf,
    // serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
    updates: watch::Sender<Vec<Birthday>>,
}

impl LocalFileProvider {
    pub fn new(path: PathBuf) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        LocalFileProvider {
            path,
            write_lock: Mutex::new(()),
            updates,
        }
    }

    /// Provider storing `birthdays.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(BIRTHDAYS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file. Missing means empty; unparsable content is logged
    /// and treated as empty so the next write starts fresh.
    fn read(&self) -> SocialCalResult<Vec<Birthday>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(birthdays) => Ok(birthdays),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse birthdays");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, birthdays: &[Birthday]) -> SocialCalResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(birthdays)
            .map_err(|e| SocialCalError::Serialization(e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Vec<Birthday>) -> T) -> SocialCalResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SocialCalError::Provider("local provider lock poisoned".into()))?;

        let mut birthdays = self.read()?;
        let result = f(&mut birthdays);
        self.write(&birthdays)?;

        tracing::debug!(count = birthdays.len(), "saved local birthdays");
        self.updates.send_replace(birthdays);
        Ok(result)
    }
}

#[async_trait]
impl PersistenceProvider for LocalFileProvider {
    fn name(&self) -> &str {
        "local"
    }

    async fn load(&self) -> SocialCalResult<Vec<Birthday>> {
        let birthdays = self.read()?;
        self.updates.send_replace(birthdays.clone());
        Ok(birthdays)
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Birthday>> {
        self.updates.subscribe()
    }

    async fn create(&self, birthday: NewBirthday) -> SocialCalResult<Birthday> {
        let birthday = birthday.into_birthday(Birthday::generate_id());
        self.modify(|all| all.push(birthday.clone()))?;
        Ok(birthday)
    }

    async fn delete(&self, id: &str) -> SocialCalResult<()> {
        let removed = self.modify(|all| {
            let before = all.len();
            all.retain(|b| b.id != id);
            before - all.len()
        })?;

        if removed == 0 {
            return Err(SocialCalError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_all(&self) -> SocialCalResult<()> {
        self.modify(|all| all.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, month_index: u32, day_index: u32) -> NewBirthday {
        NewBirthday {
            name: name.into(),
            handle: name.to_lowercase(),
            month_index,
            day_index,
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalFileProvider::in_dir(dir.path());
        assert!(provider.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalFileProvider::in_dir(dir.path());

        let ada = provider.create(entry("Ada", 11, 10)).await.unwrap();
        let alan = provider.create(entry("Alan", 5, 23)).await.unwrap();

        let reopened = LocalFileProvider::in_dir(dir.path());
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded, vec![ada, alan]);
    }

    #[tokio::test]
    async fn test_file_uses_camel_case_fields() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalFileProvider::in_dir(dir.path());
        provider.create(entry("Ada", 11, 10)).await.unwrap();

        let raw = std::fs::read_to_string(provider.path()).unwrap();
        assert!(raw.contains("\"monthIndex\": 11"));
        assert!(raw.contains("\"dayIndex\": 10"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("birthdays.json"), "{not json").unwrap();

        let provider = LocalFileProvider::in_dir(dir.path());
        assert!(provider.load().await.unwrap().is_empty());

        provider.create(entry("Fresh", 0, 1)).await.unwrap();
        assert_eq!(provider.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_publish_full_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalFileProvider::in_dir(dir.path());
        let mut updates = provider.subscribe();

        let a = provider.create(entry("A", 0, 1)).await.unwrap();
        provider.create(entry("B", 0, 2)).await.unwrap();
        assert_eq!(updates.borrow_and_update().len(), 2);

        provider.delete(&a.id).await.unwrap();
        assert_eq!(updates.borrow_and_update()[0].name, "B");

        provider.delete_all().await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert!(updates.borrow_and_update().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalFileProvider::in_dir(dir.path());
        let err = provider.delete("nope").await.unwrap_err();
        assert!(matches!(err, SocialCalError::NotFound(_)));
    }
}
