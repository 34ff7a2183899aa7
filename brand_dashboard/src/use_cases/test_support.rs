use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ApiError, BrandApi, RequestOptions, SessionStore};

// Canned upstream response keyed by request path (query string included).
type ResponseTable = Arc<Mutex<HashMap<String, Result<Value, ApiError>>>>;
pub(crate) type CallLog = Arc<Mutex<Vec<(String, RequestOptions)>>>;

// Fake brand API that replays canned responses and records every call.
#[derive(Clone, Default)]
pub(crate) struct RecordingApi {
    responses: ResponseTable,
    calls: CallLog,
}

impl RecordingApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, path: impl Into<String>, response: Result<Value, ApiError>) -> Self {
        let mut guard = self.responses.lock().expect("responses mutex poisoned");
        guard.insert(path.into(), response);
        drop(guard);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, RequestOptions)> {
        let guard = self.calls.lock().expect("calls mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl BrandApi for RecordingApi {
    async fn fetch(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        {
            let mut guard = self.calls.lock().expect("calls mutex poisoned");
            guard.push((path.to_string(), options));
        }

        let guard = self.responses.lock().expect("responses mutex poisoned");
        guard.get(path).cloned().unwrap_or_else(|| {
            Err(ApiError::Status {
                status: 404,
                message: "Request failed with status 404".to_string(),
            })
        })
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
    pub clear: bool,
}

// In-memory store with switchable failures for use-case tests.
#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    token: Arc<Mutex<Option<String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_token(self, token: impl Into<String>) -> Self {
        let mut guard = self.token.lock().expect("token mutex poisoned");
        *guard = Some(token.into());
        drop(guard);
        self
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn current_token(&self) -> Option<String> {
        let guard = self.token.lock().expect("token mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn get(&self) -> Result<Option<String>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        Ok(self.current_token())
    }

    async fn set(&self, token: String) -> Result<(), String> {
        if self.failures.set {
            return Err("set failed".to_string());
        }
        let mut guard = self.token.lock().expect("token mutex poisoned");
        *guard = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<bool, String> {
        if self.failures.clear {
            return Err("clear failed".to_string());
        }
        let mut guard = self.token.lock().expect("token mutex poisoned");
        Ok(guard.take().is_some())
    }
}
