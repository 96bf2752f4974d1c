use async_trait::async_trait;
use url::Url;

use crate::domain::entities::{BrowserOutcome, HttpOutcome, HttpRequest};
use crate::domain::errors::ResponseError;

// Port for the platform key-value preference area.
pub trait PreferenceStore: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn put_string(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn flush(&self) -> Result<(), String>;
}

// Port for the HTTP client. Implementations must yield exactly one outcome.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> HttpOutcome;
}

// Port for the interactive login dialog that obtains a fresh token.
#[async_trait]
pub trait BrowserLogin: Send + Sync {
    async fn login(&self, dialog_url: Url) -> BrowserOutcome;
}

// Caller-supplied callback. The sign-in service invokes exactly one method once.
pub trait ResponseListener: Send + Sync {
    fn success(&self);
    fn error(&self, error: ResponseError);
}
