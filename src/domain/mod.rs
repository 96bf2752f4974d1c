// Domain layer: sign-in entities, error codes and the ports adapters implement.

pub mod entities;
pub mod errors;
pub mod graph;
pub mod ports;

pub use entities::{
    BrowserOutcome, CredentialSource, HttpOutcome, HttpRequest, SignInMode, SignedIn,
};
pub use errors::{ErrorCode, ResponseError};
pub use graph::{GraphApi, parse_login_redirect};
pub use ports::{BrowserLogin, HttpTransport, PreferenceStore, ResponseListener};
