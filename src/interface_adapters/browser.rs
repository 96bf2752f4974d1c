use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::info;
use url::Url;

use crate::domain::entities::BrowserOutcome;
use crate::domain::graph::parse_login_redirect;
use crate::domain::ports::BrowserLogin;

// Login flow for terminals: the user opens the dialog URL in any browser and
// pastes back the URL it redirected to.
pub struct PromptBrowserLogin<R> {
    input: Mutex<R>,
}

impl PromptBrowserLogin<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> PromptBrowserLogin<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

#[async_trait]
impl<R> BrowserLogin for PromptBrowserLogin<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn login(&self, dialog_url: Url) -> BrowserOutcome {
        info!("login required");
        println!("Open this URL in a browser and sign in:\n\n  {dialog_url}\n");
        println!("Paste the URL you were redirected to (empty line cancels):");

        let mut line = String::new();
        let mut input = self.input.lock().await;
        match input.read_line(&mut line).await {
            Ok(0) => BrowserOutcome::Cancelled,
            Ok(_) => parse_login_redirect(&line),
            Err(err) => BrowserOutcome::Failed(err.to_string()),
        }
    }
}
