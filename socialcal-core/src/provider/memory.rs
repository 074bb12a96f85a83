//! In-process provider, used for throwaway sessions and tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::birthday::{Birthday, NewBirthday};
use crate::error::{SocialCalError, SocialCalResult};
use crate::provider::PersistenceProvider;

pub struct MemoryProvider {
    records: Mutex<Vec<Birthday>>,
    updates: watch::Sender<Vec<Birthday>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::with_birthdays(Vec::new())
    }

    pub fn with_birthdays(birthdays: Vec<Birthday>) -> Self {
        let (updates, _) = watch::channel(birthdays.clone());
        MemoryProvider {
            records: Mutex::new(birthdays),
            updates,
        }
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Birthday>) -> T) -> SocialCalResult<T> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| SocialCalError::Provider("memory provider lock poisoned".into()))?;
        let result = f(&mut records);
        self.updates.send_replace(records.clone());
        Ok(result)
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> SocialCalResult<Vec<Birthday>> {
        self.mutate(|records| records.clone())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Birthday>> {
        self.updates.subscribe()
    }

    async fn create(&self, birthday: NewBirthday) -> SocialCalResult<Birthday> {
        let birthday = birthday.into_birthday(Birthday::generate_id());
        self.mutate(|records| records.push(birthday.clone()))?;
        Ok(birthday)
    }

    async fn delete(&self, id: &str) -> SocialCalResult<()> {
        let removed = self.mutate(|records| {
            let before = records.len();
            records.retain(|b| b.id != id);
            before - records.len()
        })?;

        if removed == 0 {
            return Err(SocialCalError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_all(&self) -> SocialCalResult<()> {
        self.mutate(|records| records.clear())
    }
}
