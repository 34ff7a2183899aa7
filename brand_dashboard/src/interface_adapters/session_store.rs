use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::SessionStore;

// Well-known key the token is stored under inside the session file.
pub const TOKEN_KEY: &str = "brand_token";

// In-memory session store adapter; nothing survives the process.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    pub token: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self) -> Result<Option<String>, String> {
        let token = self.token.lock().await;
        Ok(token.clone())
    }

    async fn set(&self, token: String) -> Result<(), String> {
        let mut slot = self.token.lock().await;
        *slot = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<bool, String> {
        let mut slot = self.token.lock().await;
        Ok(slot.take().is_some())
    }
}

/// File-backed session store, the CLI's equivalent of browser local storage.
///
/// The file holds a flat JSON object; only [`TOKEN_KEY`] is owned by this
/// store and any other keys are written back untouched.
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Map<String, Value>, String> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(format!("read {}: {err}", self.path.display())),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(format!("{} is not a JSON object", self.path.display())),
            Err(err) => Err(format!("parse {}: {err}", self.path.display())),
        }
    }

    async fn write_entries(&self, entries: Map<String, Value>) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| format!("create {}: {err}", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|err| format!("encode session: {err}"))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|err| format!("write {}: {err}", self.path.display()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    // A null entry reads as no session; any other non-string entry is corrupt.
    async fn get(&self) -> Result<Option<String>, String> {
        let entries = self.read_entries().await?;
        match entries.get(TOKEN_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) => Ok(Some(token.clone())),
            Some(other) => Err(format!(
                "{} holds a non-string {TOKEN_KEY}: {other}",
                self.path.display()
            )),
        }
    }

    async fn set(&self, token: String) -> Result<(), String> {
        let mut entries = self.read_entries().await?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token));
        self.write_entries(entries).await?;
        tracing::debug!(path = %self.path.display(), "session token stored.");
        Ok(())
    }

    // Any entry under the key is dropped, but only a string counts as a cleared token.
    async fn clear(&self) -> Result<bool, String> {
        let mut entries = self.read_entries().await?;
        let Some(previous) = entries.remove(TOKEN_KEY) else {
            return Ok(false);
        };
        self.write_entries(entries).await?;
        tracing::debug!(path = %self.path.display(), "session token cleared.");
        Ok(matches!(previous, Value::String(_)))
    }
}
