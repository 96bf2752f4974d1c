pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{
    BrowserLogin, BrowserOutcome, CredentialSource, ErrorCode, GraphApi, HttpOutcome, HttpRequest,
    HttpTransport, PreferenceStore, ResponseError, ResponseListener, SignInMode, SignedIn,
};
pub use frameworks::runtime::run;
pub use use_cases::{SignInService, TokenStore};
