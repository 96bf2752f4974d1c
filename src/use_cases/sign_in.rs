use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::domain::entities::{BrowserOutcome, CredentialSource, SignInMode, SignedIn};
use crate::domain::errors::{ErrorCode, ResponseError};
use crate::domain::graph::GraphApi;
use crate::domain::ports::{BrowserLogin, HttpTransport, PreferenceStore, ResponseListener};
use crate::use_cases::resolver::{Resolution, deliver, resolve};
use crate::use_cases::token_store::TokenStore;

// Cached credential and signed-in flag for one service instance.
#[derive(Default)]
struct Session {
    access_token: String,
    signed_in: bool,
}

// Sign-in workflow with injected transport, preferences and browser login.
pub struct SignInService<T, P, B> {
    transport: T,
    tokens: TokenStore<P>,
    browser: B,
    graph: GraphApi,
    gui_available: bool,
    session: Mutex<Session>,
    // Held for the duration of an attempt so only one request is outstanding.
    in_flight: tokio::sync::Mutex<()>,
}

impl<T, P, B> SignInService<T, P, B>
where
    T: HttpTransport,
    P: PreferenceStore,
    B: BrowserLogin,
{
    pub fn new(transport: T, preferences: P, browser: B, graph: GraphApi) -> Self {
        let tokens = TokenStore::new(preferences);
        let access_token = tokens.get();
        debug!(cached = !access_token.is_empty(), "sign-in service loaded");

        Self {
            transport,
            tokens,
            browser,
            graph,
            gui_available: true,
            session: Mutex::new(Session {
                access_token,
                signed_in: false,
            }),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    // Platforms without a browser treat every attempt as silent.
    pub fn without_gui(mut self) -> Self {
        self.gui_available = false;
        self
    }

    pub fn is_loaded(&self) -> bool {
        true
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().signed_in
    }

    pub fn access_token(&self) -> Option<String> {
        let session = self.session();
        (!session.access_token.is_empty()).then(|| session.access_token.clone())
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.tokens.set(&token);
        self.session().access_token = token;
    }

    pub fn sign_out(&self) {
        {
            let mut session = self.session();
            session.access_token.clear();
            session.signed_in = false;
        }
        self.tokens.clear();
        debug!("signed out");
    }

    pub fn preferences(&self) -> &P {
        self.tokens.preferences()
    }

    // Interactive sign-in: login UI may open when the cached token is rejected.
    pub async fn sign_in<L>(&self, listener: L)
    where
        L: ResponseListener,
    {
        self.sign_in_with_mode(SignInMode::Interactive, listener)
            .await
    }

    pub async fn sign_in_with_mode<L>(&self, mode: SignInMode, listener: L)
    where
        L: ResponseListener,
    {
        let result = self.attempt(mode).await;
        deliver(listener, result);
    }

    // Future form of sign-in; the listener variants dispatch on this result.
    pub async fn attempt(&self, mode: SignInMode) -> Result<SignedIn, ResponseError> {
        let span = info_span!(
            "sign_in",
            attempt_id = %Uuid::new_v4(),
            silent = mode.is_silent()
        );
        async {
            let result = self.run_attempt(mode).await;
            match &result {
                Ok(signed_in) => info!(source = ?signed_in.source, "signed in"),
                Err(error) => info!(code = ?error.code(), "sign-in failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_attempt(&self, mode: SignInMode) -> Result<SignedIn, ResponseError> {
        let _in_flight = self.in_flight.lock().await;
        let allow_gui = !mode.is_silent() && self.gui_available;

        // Capture the candidate before the reset clears it.
        let token = self.session().access_token.clone();
        self.sign_out();

        if token.is_empty() && !allow_gui {
            return Err(ResponseError::new(ErrorCode::EmptyAccessToken));
        }

        let request = self.graph.validation_request(&token);
        let outcome = self.transport.send(request).await;

        match resolve(&outcome, allow_gui) {
            Resolution::Success => {
                self.remember(token);
                Ok(SignedIn {
                    source: CredentialSource::DirectValidation,
                })
            }
            Resolution::Error(code) => Err(ResponseError::new(code)),
            Resolution::BrowserLogin => self.browser_sign_in().await,
        }
    }

    async fn browser_sign_in(&self) -> Result<SignedIn, ResponseError> {
        let dialog_url = self.graph.login_dialog_url();
        debug!(%dialog_url, "opening login dialog");

        match self.browser.login(dialog_url).await {
            BrowserOutcome::Token(token) if token.is_empty() => {
                Err(ResponseError::new(ErrorCode::EmptyAccessToken))
            }
            BrowserOutcome::Token(token) => {
                self.remember(token);
                Ok(SignedIn {
                    source: CredentialSource::BrowserFlow,
                })
            }
            BrowserOutcome::Cancelled => Err(ResponseError::new(ErrorCode::Canceled)),
            BrowserOutcome::Failed(cause) => {
                warn!(%cause, "login dialog failed");
                Err(ResponseError::new(ErrorCode::Failed))
            }
        }
    }

    fn remember(&self, token: String) {
        self.tokens.set(&token);
        let mut session = self.session();
        session.access_token = token;
        session.signed_in = true;
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
