use url::Url;

// Whether the caller allows interactive login UI for this attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInMode {
    Interactive,
    Silent,
}

impl SignInMode {
    pub fn from_silent(silent: bool) -> Self {
        if silent {
            SignInMode::Silent
        } else {
            SignInMode::Interactive
        }
    }

    pub fn is_silent(self) -> bool {
        matches!(self, SignInMode::Silent)
    }
}

// Single outbound GET handed to the transport port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self { url }
    }

    // Reads a query parameter back out of the request URL.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

// Terminal signal of one HTTP request. Exactly one is produced per send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpOutcome {
    Cancelled,
    Failed(String),
    Completed { status: u16, body: Option<String> },
}

// Terminal signal of one browser login dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserOutcome {
    Token(String),
    Cancelled,
    Failed(String),
}

// Which credential provider produced the signed-in token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    DirectValidation,
    BrowserFlow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedIn {
    pub source: CredentialSource,
}
