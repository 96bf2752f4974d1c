use std::fmt;

// Discrete failure codes delivered to sign-in listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyAccessToken,
    Canceled,
    Failed,
    BadRequest,
}

impl ErrorCode {
    // Stable numeric value for callers that persist or forward codes.
    pub fn as_u32(self) -> u32 {
        match self {
            ErrorCode::EmptyAccessToken => 1,
            ErrorCode::Canceled => 2,
            ErrorCode::Failed => 3,
            ErrorCode::BadRequest => 4,
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            ErrorCode::EmptyAccessToken => "no access token available",
            ErrorCode::Canceled => "sign-in was cancelled",
            ErrorCode::Failed => "sign-in request failed",
            ErrorCode::BadRequest => "access token was rejected",
        }
    }
}

// Immutable error value handed to `ResponseListener::error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseError {
    code: ErrorCode,
    message: String,
}

impl ResponseError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorCode> for ResponseError {
    fn from(code: ErrorCode) -> Self {
        ResponseError::new(code)
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sign-in error {}: {}", self.code.as_u32(), self.message)
    }
}

impl std::error::Error for ResponseError {}
