use serde_json::Value;

/// Why a call did not succeed. Handed to the error mapper and rendered into
/// [`CallResult::error_message`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CallError {
    /// The request never produced a response.
    #[error("Request error - {0}")]
    Transport(String),
    #[error("Request error - could not encode request body: {0}")]
    Encode(String),
    #[error("Request error - could not parse response body: {reason}")]
    InvalidBody { status_code: u16, reason: String },
    /// The body was flagged as an error by the classifier.
    #[error("{message}")]
    Api {
        status_code: u16,
        message: String,
        code: Option<String>,
        body: Value,
    },
    /// The success mapper rejected the body.
    #[error("Request error - {reason}")]
    Mapping {
        status_code: u16,
        body: Value,
        reason: String,
    },
}

impl CallError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CallError::Transport(_) | CallError::Encode(_) => None,
            CallError::InvalidBody { status_code, .. }
            | CallError::Api { status_code, .. }
            | CallError::Mapping { status_code, .. } => Some(*status_code),
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            CallError::Api { body, .. } | CallError::Mapping { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// The domain error code extracted by the classifier, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            CallError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Returned by a success mapper that cannot make sense of a body. The call is
/// then reported as failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MapError(pub String);

impl From<serde_json::Error> for MapError {
    fn from(error: serde_json::Error) -> Self {
        MapError(error.to_string())
    }
}

/// Normalized outcome of one HTTP call.
///
/// `error_message` is present exactly when the call failed, and `extension`
/// comes from the success mapper on success and from the error mapper
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult<E> {
    has_succeeded: bool,
    status_code: Option<u16>,
    raw_body: Option<Value>,
    error_message: Option<String>,
    extension: E,
}

impl<E> CallResult<E> {
    pub fn succeeded(status_code: u16, raw_body: Value, extension: E) -> Self {
        Self {
            has_succeeded: true,
            status_code: Some(status_code),
            raw_body: Some(raw_body),
            error_message: None,
            extension,
        }
    }

    pub fn failed(error: &CallError, extension: E) -> Self {
        Self {
            has_succeeded: false,
            status_code: error.status_code(),
            raw_body: error.body().cloned(),
            error_message: Some(error.to_string()),
            extension,
        }
    }

    pub fn has_succeeded(&self) -> bool {
        self.has_succeeded
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn raw_body(&self) -> Option<&Value> {
        self.raw_body.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn extension(&self) -> &E {
        &self.extension
    }

    pub fn into_extension(self) -> E {
        self.extension
    }
}
