//! Provider subprocess protocol.
//!
//! Hosted datastores are reached through external binaries named
//! `socialcal-provider-<name>` on PATH, speaking JSON over stdin/stdout
//! (see `protocol`). Providers manage their own credentials; socialcal
//! only forwards `provider_params` from the config.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::birthday::{Birthday, NewBirthday};
use crate::error::{SocialCalError, SocialCalResult};
use crate::provider::PersistenceProvider;
use crate::provider::protocol::{
    Command, CreateBirthday, DeleteAll, DeleteBirthday, ListBirthdays, ProviderCommand, Request,
    Response,
};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ExternalProvider {
    name: String,
    binary_path: PathBuf,
    params: serde_json::Map<String, serde_json::Value>,
    updates: watch::Sender<Vec<Birthday>>,
}

impl ExternalProvider {
    /// Locate `socialcal-provider-<name>` on PATH.
    pub fn from_name(
        name: &str,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> SocialCalResult<Self> {
        let binary_name = format!("socialcal-provider-{name}");
        let binary_path = which::which(&binary_name)
            .map_err(|_| SocialCalError::ProviderNotInstalled(name.to_string()))?;

        Ok(Self::with_binary(name, binary_path, params))
    }

    pub fn with_binary(
        name: &str,
        binary_path: PathBuf,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        ExternalProvider {
            name: name.to_string(),
            binary_path,
            params,
            updates,
        }
    }

    /// Call a typed provider command and return the result.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> SocialCalResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| SocialCalError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    async fn call_raw<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> SocialCalResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| SocialCalError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| SocialCalError::Serialization(e.to_string()))?;

        tracing::debug!(provider = %self.name, ?command, "calling provider");

        let mut child = TokioCommand::new(&self.binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SocialCalError::Provider(format!(
                    "Failed to spawn {}: {}",
                    self.binary_path.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SocialCalError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(SocialCalError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        let response_line = response_str.trim();
        if response_line.is_empty() {
            return Err(SocialCalError::Provider("Provider returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(response_line)
            .map_err(|e| SocialCalError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(SocialCalError::Provider(error)),
        }
    }

    /// Re-fetch the whole list and push it to subscribers.
    async fn refresh(&self) -> SocialCalResult<Vec<Birthday>> {
        let birthdays = self
            .call(ListBirthdays {
                provider_params: self.params.clone(),
            })
            .await?;
        self.updates.send_replace(birthdays.clone());
        Ok(birthdays)
    }

    /// Refresh after a write the provider already accepted. A failed
    /// re-fetch must not turn that write into an error, so the last
    /// snapshot is patched locally instead.
    async fn refresh_after_write(&self, patch: impl FnOnce(&mut Vec<Birthday>)) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(provider = %self.name, error = %e, "refresh after write failed");
            self.updates.send_modify(patch);
        }
    }
}

#[async_trait]
impl PersistenceProvider for ExternalProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> SocialCalResult<Vec<Birthday>> {
        self.refresh().await
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Birthday>> {
        self.updates.subscribe()
    }

    async fn create(&self, birthday: NewBirthday) -> SocialCalResult<Birthday> {
        let created = self
            .call(CreateBirthday {
                provider_params: self.params.clone(),
                birthday,
            })
            .await?;
        self.refresh_after_write(|all| all.push(created.clone())).await;
        Ok(created)
    }

    async fn delete(&self, id: &str) -> SocialCalResult<()> {
        self.call(DeleteBirthday {
            provider_params: self.params.clone(),
            id: id.to_string(),
        })
        .await?;
        self.refresh_after_write(|all| all.retain(|b| b.id != id)).await;
        Ok(())
    }

    async fn delete_all(&self) -> SocialCalResult<()> {
        self.call(DeleteAll {
            provider_params: self.params.clone(),
        })
        .await?;
        self.refresh_after_write(|all| all.clear()).await;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script acting as a provider.
    fn script_provider(dir: &std::path::Path, body: &str) -> PathBuf {
        let path = dir.join("socialcal-provider-test");
        std::fs::write(&path, format!("#!/bin/sh\nread request\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_parses_snapshot_and_publishes_it() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script_provider(
            dir.path(),
            r#"echo '{"status":"success","data":[{"id":"r1","name":"Ada","handle":"ada","monthIndex":11,"dayIndex":10}]}'"#,
        );
        let provider = ExternalProvider::with_binary("test", binary, serde_json::Map::new());
        let updates = provider.subscribe();

        let loaded = provider.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "r1");
        assert_eq!(updates.borrow()[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_error_response_becomes_provider_error() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script_provider(
            dir.path(),
            r#"echo '{"status":"error","error":"relation birthdays does not exist"}'"#,
        );
        let provider = ExternalProvider::with_binary("test", binary, serde_json::Map::new());

        let err = provider.load().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Provider error: relation birthdays does not exist"
        );
    }

    const ADA: &str =
        r#"{"id":"r1","name":"Ada","handle":"ada","monthIndex":11,"dayIndex":10}"#;

    /// Provider that logs each command to `calls` and answers per command.
    /// `list_birthdays` reports Ada once `created` exists.
    fn stateful_provider(dir: &std::path::Path, list_fails: bool) -> PathBuf {
        let state = dir.display();
        let list = if list_fails {
            r#"echo '{"status":"error","error":"list temporarily unavailable"}'"#.to_string()
        } else {
            format!(
                r#"if [ -f {state}/created ]; then echo '{{"status":"success","data":[{ADA}]}}'; else echo '{{"status":"success","data":[]}}'; fi"#
            )
        };
        script_provider(
            dir,
            &format!(
                r#"case "$request" in
  *'"command":"list_birthdays"'*) echo list >> {state}/calls; {list} ;;
  *'"command":"create_birthday"'*) echo create >> {state}/calls; touch {state}/created; echo '{{"status":"success","data":{ADA}}}' ;;
  *'"command":"delete_all"'*) echo delete_all >> {state}/calls; rm -f {state}/created; echo '{{"status":"success","data":null}}' ;;
esac"#
            ),
        )
    }

    fn entry() -> NewBirthday {
        NewBirthday {
            name: "Ada".into(),
            handle: "ada".into(),
            month_index: 11,
            day_index: 10,
        }
    }

    fn calls(dir: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(dir.join("calls"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    #[tokio::test]
    async fn test_create_refreshes_and_publishes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let binary = stateful_provider(dir.path(), false);
        let provider = ExternalProvider::with_binary("test", binary, serde_json::Map::new());
        let mut updates = provider.subscribe();

        let created = provider.create(entry()).await.unwrap();

        assert_eq!(created.id, "r1");
        assert_eq!(calls(dir.path()), vec!["create", "list"]);
        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), vec![created]);

        provider.delete_all().await.unwrap();
        assert!(updates.borrow_and_update().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_successful_create() {
        let dir = tempfile::tempdir().unwrap();
        let binary = stateful_provider(dir.path(), true);
        let provider = ExternalProvider::with_binary("test", binary, serde_json::Map::new());
        let updates = provider.subscribe();

        let created = provider.create(entry()).await.unwrap();

        assert_eq!(calls(dir.path()), vec!["create", "list"]);
        assert!(dir.path().join("created").exists());
        assert_eq!(*updates.borrow(), vec![created]);
    }

    #[test]
    fn test_missing_provider_error_names_provider_once() {
        let err = ExternalProvider::from_name("nonexistent-xyz", serde_json::Map::new())
            .err()
            .unwrap();
        let message = err.to_string();
        assert_eq!(message.matches("nonexistent-xyz").count(), 2);
        assert!(message.starts_with("Provider 'nonexistent-xyz' not found in PATH"));
        assert!(message.contains("cargo install socialcal-provider-nonexistent-xyz"));
    }

    #[tokio::test]
    async fn test_silent_provider_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let binary = script_provider(dir.path(), "exit 0");
        let provider = ExternalProvider::with_binary("test", binary, serde_json::Map::new());

        let err = provider.delete_all().await.unwrap_err();
        assert!(err.to_string().contains("no response"));
    }
}
