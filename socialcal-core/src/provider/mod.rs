//! Persistence providers.
//!
//! A provider owns the durable copy of the birthday list. It hands out a
//! full snapshot on `load`, pushes a full replacement snapshot to
//! subscribers whenever the list changes, and accepts creates and deletes.
//! The rest of the crate only sees the `PersistenceProvider` trait.

mod external;
mod local;
mod memory;
pub mod protocol;

pub use external::ExternalProvider;
pub use local::LocalFileProvider;
pub use memory::MemoryProvider;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::birthday::{Birthday, NewBirthday};
use crate::config::SocialcalConfig;
use crate::error::SocialCalResult;

#[async_trait]
pub trait PersistenceProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the current list and publish it to subscribers.
    async fn load(&self) -> SocialCalResult<Vec<Birthday>>;

    /// Receive a full replacement snapshot after every change.
    fn subscribe(&self) -> watch::Receiver<Vec<Birthday>>;

    /// Store a new birthday; the provider assigns the id.
    async fn create(&self, birthday: NewBirthday) -> SocialCalResult<Birthday>;

    async fn delete(&self, id: &str) -> SocialCalResult<()>;

    async fn delete_all(&self) -> SocialCalResult<()>;
}

#[async_trait]
impl<P: PersistenceProvider + ?Sized> PersistenceProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn load(&self) -> SocialCalResult<Vec<Birthday>> {
        (**self).load().await
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Birthday>> {
        (**self).subscribe()
    }

    async fn create(&self, birthday: NewBirthday) -> SocialCalResult<Birthday> {
        (**self).create(birthday).await
    }

    async fn delete(&self, id: &str) -> SocialCalResult<()> {
        (**self).delete(id).await
    }

    async fn delete_all(&self) -> SocialCalResult<()> {
        (**self).delete_all().await
    }
}

/// Which provider a config selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Local,
    Memory,
    External(String),
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "" | "local" => ProviderKind::Local,
            "memory" => ProviderKind::Memory,
            other => ProviderKind::External(other.to_string()),
        }
    }
}

/// Build the provider named in the config.
pub fn open_provider(config: &SocialcalConfig) -> SocialCalResult<Box<dyn PersistenceProvider>> {
    let provider: Box<dyn PersistenceProvider> = match ProviderKind::from_name(&config.provider) {
        ProviderKind::Local => Box::new(LocalFileProvider::in_dir(&config.data_path())),
        ProviderKind::Memory => Box::new(MemoryProvider::new()),
        ProviderKind::External(name) => {
            Box::new(ExternalProvider::from_name(&name, config.provider_params_json())?)
        }
    };

    tracing::debug!(provider = provider.name(), "opened provider");
    Ok(provider)
}
