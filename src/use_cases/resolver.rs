use tracing::{debug, warn};

use crate::domain::entities::{HttpOutcome, SignedIn};
use crate::domain::errors::{ErrorCode, ResponseError};
use crate::domain::ports::ResponseListener;

const HTTP_OK: u16 = 200;

// What the sign-in workflow does next after one HTTP outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Success,
    Error(ErrorCode),
    BrowserLogin,
}

pub fn resolve(outcome: &HttpOutcome, allow_gui: bool) -> Resolution {
    match outcome {
        HttpOutcome::Cancelled => Resolution::Error(ErrorCode::Canceled),
        HttpOutcome::Failed(cause) => {
            // Cause stays in the logs; callers only see the generic code.
            warn!(%cause, "token validation request failed");
            Resolution::Error(ErrorCode::Failed)
        }
        HttpOutcome::Completed { status, .. } if *status == HTTP_OK => Resolution::Success,
        HttpOutcome::Completed { status, .. } => {
            debug!(status, allow_gui, "token validation rejected");
            if allow_gui {
                Resolution::BrowserLogin
            } else {
                Resolution::Error(ErrorCode::BadRequest)
            }
        }
    }
}

// Hands the attempt result to the listener. Consuming the listener keeps it to one call.
pub fn deliver<L>(listener: L, result: Result<SignedIn, ResponseError>)
where
    L: ResponseListener,
{
    match result {
        Ok(_) => listener.success(),
        Err(error) => listener.error(error),
    }
}
