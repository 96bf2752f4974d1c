use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use crate::domain::entities::{BrowserOutcome, HttpOutcome, HttpRequest};
use crate::domain::errors::{ErrorCode, ResponseError};
use crate::domain::graph::GraphApi;
use crate::domain::ports::{BrowserLogin, HttpTransport, PreferenceStore, ResponseListener};
use crate::use_cases::token_store::ACCESS_TOKEN_KEY;

pub(crate) fn test_graph() -> GraphApi {
    GraphApi::new("test-app").expect("expected default graph endpoints to parse")
}

pub(crate) fn completed(status: u16) -> HttpOutcome {
    HttpOutcome::Completed { status, body: None }
}

// In-memory preference store that counts removals and flushes.
#[derive(Clone, Default)]
pub(crate) struct RecordingPreferences {
    values: Arc<Mutex<HashMap<String, String>>>,
    removes: Arc<AtomicUsize>,
    flushes: Arc<AtomicUsize>,
    fail_flush: bool,
}

impl RecordingPreferences {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_token(token: &str) -> Self {
        let preferences = Self::new();
        preferences
            .values
            .lock()
            .expect("values mutex poisoned")
            .insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        preferences
    }

    pub(crate) fn with_failing_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        let guard = self.values.lock().expect("values mutex poisoned");
        guard.get(key).cloned()
    }

    pub(crate) fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub(crate) fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for RecordingPreferences {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or_else(|| default.to_string())
    }

    fn put_string(&self, key: &str, value: &str) {
        let mut guard = self.values.lock().expect("values mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.removes.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.values.lock().expect("values mutex poisoned");
        guard.remove(key);
    }

    fn flush(&self) -> Result<(), String> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail_flush {
            return Err("flush failed".to_string());
        }
        Ok(())
    }
}

// Transport that answers every request with one scripted outcome.
#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    outcome: HttpOutcome,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new(outcome: HttpOutcome) -> Self {
        Self {
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> HttpOutcome {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request);
        self.outcome.clone()
    }
}

// Browser login stand-in that records dialog URLs and returns a fixed outcome.
#[derive(Clone)]
pub(crate) struct ScriptedBrowser {
    outcome: BrowserOutcome,
    dialogs: Arc<Mutex<Vec<Url>>>,
}

impl ScriptedBrowser {
    pub(crate) fn new(outcome: BrowserOutcome) -> Self {
        Self {
            outcome,
            dialogs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    // Browser that must never be opened by the test scenario.
    pub(crate) fn unused() -> Self {
        Self::new(BrowserOutcome::Failed("browser should not open".to_string()))
    }

    pub(crate) fn opened(&self) -> usize {
        self.dialogs.lock().expect("dialogs mutex poisoned").len()
    }

    pub(crate) fn dialogs(&self) -> Vec<Url> {
        self.dialogs.lock().expect("dialogs mutex poisoned").clone()
    }
}

#[async_trait]
impl BrowserLogin for ScriptedBrowser {
    async fn login(&self, dialog_url: Url) -> BrowserOutcome {
        self.dialogs
            .lock()
            .expect("dialogs mutex poisoned")
            .push(dialog_url);
        self.outcome.clone()
    }
}

// Listener that records every callback it receives.
#[derive(Clone, Default)]
pub(crate) struct RecordingListener {
    successes: Arc<AtomicUsize>,
    errors: Arc<Mutex<Vec<ResponseError>>>,
}

impl RecordingListener {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub(crate) fn errors(&self) -> Vec<ResponseError> {
        self.errors.lock().expect("errors mutex poisoned").clone()
    }

    pub(crate) fn error_codes(&self) -> Vec<ErrorCode> {
        self.errors().iter().map(ResponseError::code).collect()
    }

    pub(crate) fn callbacks(&self) -> usize {
        self.successes() + self.errors().len()
    }
}

impl ResponseListener for RecordingListener {
    fn success(&self) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn error(&self, error: ResponseError) {
        self.errors.lock().expect("errors mutex poisoned").push(error);
    }
}
