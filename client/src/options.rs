use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::{CallError, MapError};

/// Maps a parsed response body onto the consumer's extension fields.
pub type SuccessMapper<E> = Rc<dyn Fn(&Value) -> Result<E, MapError>>;

/// Maps a failed call onto the consumer's extension fields.
pub type ErrorMapper<E> = Rc<dyn Fn(&CallError) -> E>;

/// Programmer-facing configuration mistakes. These are reported at the point
/// of use and never absorbed into a [`crate::CallResult`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Client options require a success mapper")]
    MissingSuccessMapper,
    #[error("Client options require an error mapper")]
    MissingErrorMapper,
    #[error("Inline consumer mode requires a render callback")]
    InlineRenderMissing,
}

/// Browser credentials mode. Only honoured on wasm32.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialsMode {
    #[default]
    SameOrigin,
    Include,
    Omit,
}

/// Browser request mode. Only honoured on wasm32.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMode {
    #[default]
    Cors,
    NoCors,
}

/// Per-request transport settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub headers: Vec<(String, String)>,
    pub credentials: CredentialsMode,
    pub mode: RequestMode,
}

impl TransportOptions {
    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Where transport options come from: fixed at construction, or produced
/// fresh for every call (e.g. to pick up a refreshed auth token).
#[derive(Clone)]
pub enum TransportSource {
    Static(TransportOptions),
    Dynamic(Rc<dyn Fn() -> TransportOptions>),
}

impl TransportSource {
    pub fn resolve(&self) -> TransportOptions {
        match self {
            TransportSource::Static(options) => options.clone(),
            TransportSource::Dynamic(supplier) => supplier(),
        }
    }
}

impl Default for TransportSource {
    fn default() -> Self {
        TransportSource::Static(TransportOptions::default())
    }
}

impl fmt::Debug for TransportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportSource::Static(options) => {
                f.debug_tuple("Static").field(options).finish()
            }
            TransportSource::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Decides whether a parsed body describes an error.
///
/// A body is an error when `body[status_field] == error_value`. The message
/// and code are then read from `message_field` and `code_field`. The HTTP
/// status code plays no part in the decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassifier {
    pub status_field: String,
    pub error_value: String,
    pub message_field: String,
    pub code_field: String,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self {
            status_field: "status".into(),
            error_value: "error".into(),
            message_field: "error".into(),
            code_field: "errorCode".into(),
        }
    }
}

impl ErrorClassifier {
    pub fn classify(&self, status_code: u16, body: &Value) -> Option<CallError> {
        let flagged = body.get(self.status_field.as_str()).and_then(Value::as_str)
            == Some(self.error_value.as_str());
        if !flagged {
            return None;
        }

        let message = body
            .get(self.message_field.as_str())
            .and_then(field_text)
            .unwrap_or_else(|| "Unknown error".to_string());
        let code = body.get(self.code_field.as_str()).and_then(field_text);

        Some(CallError::Api {
            status_code,
            message,
            code,
            body: body.clone(),
        })
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Immutable client configuration, shared by every call and hook of one
/// [`crate::ApiClient`].
pub struct ClientOptions<E> {
    pub(crate) base_url: String,
    pub(crate) success_mapper: SuccessMapper<E>,
    pub(crate) error_mapper: ErrorMapper<E>,
    pub(crate) transport: TransportSource,
    pub(crate) classifier: ErrorClassifier,
}

impl<E> ClientOptions<E> {
    pub fn builder(base_url: impl Into<String>) -> ClientOptionsBuilder<E> {
        ClientOptionsBuilder {
            base_url: base_url.into(),
            success_mapper: None,
            error_mapper: None,
            transport: TransportSource::default(),
            classifier: ErrorClassifier::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn transport(&self) -> &TransportSource {
        &self.transport
    }
}

impl<E> fmt::Debug for ClientOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ClientOptions`].
///
/// Defaults: static [`TransportOptions::default`] and
/// [`ErrorClassifier::default`]. Both mappers are mandatory.
pub struct ClientOptionsBuilder<E> {
    base_url: String,
    success_mapper: Option<SuccessMapper<E>>,
    error_mapper: Option<ErrorMapper<E>>,
    transport: TransportSource,
    classifier: ErrorClassifier,
}

impl<E> ClientOptionsBuilder<E> {
    pub fn success_mapper(
        mut self,
        mapper: impl Fn(&Value) -> Result<E, MapError> + 'static,
    ) -> Self {
        self.success_mapper = Some(Rc::new(mapper));
        self
    }

    pub fn error_mapper(
        mut self,
        mapper: impl Fn(&CallError) -> E + 'static,
    ) -> Self {
        self.error_mapper = Some(Rc::new(mapper));
        self
    }

    pub fn transport_options(mut self, options: TransportOptions) -> Self {
        self.transport = TransportSource::Static(options);
        self
    }

    /// Evaluate transport options fresh for every call.
    pub fn transport_supplier(
        mut self,
        supplier: impl Fn() -> TransportOptions + 'static,
    ) -> Self {
        self.transport = TransportSource::Dynamic(Rc::new(supplier));
        self
    }

    pub fn classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn build(self) -> Result<ClientOptions<E>, ConfigError> {
        let success_mapper =
            self.success_mapper.ok_or(ConfigError::MissingSuccessMapper)?;
        let error_mapper =
            self.error_mapper.ok_or(ConfigError::MissingErrorMapper)?;

        Ok(ClientOptions {
            base_url: self.base_url,
            success_mapper,
            error_mapper,
            transport: self.transport,
            classifier: self.classifier,
        })
    }
}
