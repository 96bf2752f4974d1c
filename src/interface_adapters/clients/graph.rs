use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::entities::{HttpOutcome, HttpRequest};
use crate::domain::ports::HttpTransport;

// Profile fields returned by a successful validation call.
#[derive(Debug, Deserialize)]
struct GraphUser {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

// Thin reqwest transport for Graph API calls.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
    // Bumped by `cancel_pending`; every in-flight send watches it.
    cancel: Arc<watch::Sender<u64>>,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let (cancel, _) = watch::channel(0);
        Ok(Self {
            http,
            cancel: Arc::new(cancel),
        })
    }

    // Resolves every request currently in flight as cancelled.
    pub fn cancel_pending(&self) {
        self.cancel.send_modify(|generation| *generation += 1);
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> HttpOutcome {
        let mut cancelled = self.cancel.subscribe();
        // The query carries the token, so only the path is logged.
        debug!(path = request.url.path(), "sending graph request");

        let exchange = async {
            let response = self.http.get(request.url.clone()).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        tokio::select! {
            result = exchange => match result {
                Ok((status, body)) => {
                    log_profile(status, &body);
                    HttpOutcome::Completed {
                        status,
                        body: Some(body),
                    }
                }
                Err(err) => HttpOutcome::Failed(err.to_string()),
            },
            _ = cancelled.changed() => HttpOutcome::Cancelled,
        }
    }
}

fn log_profile(status: u16, body: &str) {
    if status != 200 {
        debug!(status, "graph request rejected");
        return;
    }
    match serde_json::from_str::<GraphUser>(body) {
        Ok(user) => debug!(user_id = %user.id, name = ?user.name, "token belongs to user"),
        Err(err) => debug!(error = %err, "unrecognised profile body"),
    }
}
