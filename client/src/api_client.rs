use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::{CallError, CallResult, ClientOptions, RequestStateHandle};

#[cfg(target_arch = "wasm32")]
use crate::{CredentialsMode, RequestMode, TransportOptions};

type Outcome = Result<(u16, Value), CallError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// GET never carries a request body.
    pub fn allows_body(self) -> bool {
        !matches!(self, Method::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Dispatches calls against one base URL and normalizes every outcome into a
/// [`CallResult`]. Cheap to clone; clones share configuration.
pub struct ApiClient<E> {
    options: Rc<ClientOptions<E>>,
    inner_client: reqwest::Client,
}

impl<E> Clone for ApiClient<E> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            inner_client: self.inner_client.clone(),
        }
    }
}

/// Two clients are equal when they share configuration.
impl<E> PartialEq for ApiClient<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.options, &other.options)
    }
}

impl<E> fmt::Debug for ApiClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E> ApiClient<E> {
    pub fn new(options: ClientOptions<E>) -> Self {
        Self::with_client(options, reqwest::Client::new())
    }

    pub fn with_client(
        options: ClientOptions<E>,
        inner_client: reqwest::Client,
    ) -> Self {
        Self {
            options: Rc::new(options),
            inner_client,
        }
    }

    pub fn options(&self) -> &ClientOptions<E> {
        &self.options
    }

    fn format_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.options.base_url)
    }
}

/// Helper methods for http actions
impl<E> ApiClient<E> {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Outcome {
        let url = self.format_url(endpoint);
        let transport = self.options.transport.resolve();

        tracing::debug!(%method, %url, "dispatching request");

        let mut request = self.inner_client.request(method.into(), &url);
        for (name, value) in &transport.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body.filter(|_| method.allows_body()) {
            request = request.json(body);
        }

        #[cfg(target_arch = "wasm32")]
        let request = apply_fetch_options(request, &transport);

        let response = request
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;
        let status_code = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let body = parse_body(&text).map_err(|e| CallError::InvalidBody {
            status_code,
            reason: e.to_string(),
        })?;

        tracing::debug!(%method, %url, status_code, "received response");
        Ok((status_code, body))
    }

    fn normalize(&self, outcome: Outcome) -> CallResult<E> {
        let error = match outcome {
            Ok((status_code, body)) => {
                match self.options.classifier.classify(status_code, &body) {
                    Some(error) => error,
                    None => match (self.options.success_mapper)(&body) {
                        Ok(extension) => {
                            return CallResult::succeeded(
                                status_code,
                                body,
                                extension,
                            );
                        }
                        Err(e) => CallError::Mapping {
                            status_code,
                            body,
                            reason: e.to_string(),
                        },
                    },
                }
            }
            Err(error) => error,
        };

        match &error {
            CallError::Api { .. } => {
                tracing::debug!(%error, "request reported an error")
            }
            _ => tracing::warn!(%error, "request failed"),
        }

        let extension = (self.options.error_mapper)(&error);
        CallResult::failed(&error, extension)
    }
}

/// Calls against the configured base URL
impl<E: Clone> ApiClient<E> {
    /// Perform one round trip. Never fails: every failure is reported through
    /// the returned [`CallResult`].
    ///
    /// If a handle is given it receives `start_request` before dispatch and
    /// `finish_request` once the call settles.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        if let Some(handle) = handle {
            handle.start_request();
        }

        let result = self.normalize(self.send(method, endpoint, body).await);

        if let Some(handle) = handle {
            handle.finish_request(result.clone());
        }
        result
    }

    pub async fn get(
        &self,
        endpoint: &str,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        self.call(Method::Get, endpoint, None, handle).await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: &impl Serialize,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        self.call_with_body(Method::Post, endpoint, body, handle).await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        body: &impl Serialize,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        self.call_with_body(Method::Put, endpoint, body, handle).await
    }

    pub async fn patch(
        &self,
        endpoint: &str,
        body: &impl Serialize,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        self.call_with_body(Method::Patch, endpoint, body, handle).await
    }

    pub async fn delete(
        &self,
        endpoint: &str,
        body: &impl Serialize,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        self.call_with_body(Method::Delete, endpoint, body, handle).await
    }

    async fn call_with_body(
        &self,
        method: Method,
        endpoint: &str,
        body: &impl Serialize,
        handle: Option<&dyn RequestStateHandle<E>>,
    ) -> CallResult<E> {
        match serde_json::to_value(body) {
            Ok(body) => self.call(method, endpoint, Some(&body), handle).await,
            Err(e) => {
                if let Some(handle) = handle {
                    handle.start_request();
                }
                let result = self.normalize(Err(CallError::Encode(e.to_string())));
                if let Some(handle) = handle {
                    handle.finish_request(result.clone());
                }
                result
            }
        }
    }
}

/// An empty body is read as JSON `null`.
fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
}

#[cfg(target_arch = "wasm32")]
fn apply_fetch_options(
    request: reqwest::RequestBuilder,
    transport: &TransportOptions,
) -> reqwest::RequestBuilder {
    let request = match transport.credentials {
        CredentialsMode::SameOrigin => request.fetch_credentials_same_origin(),
        CredentialsMode::Include => request.fetch_credentials_include(),
        CredentialsMode::Omit => request.fetch_credentials_omit(),
    };
    match transport.mode {
        RequestMode::Cors => request,
        RequestMode::NoCors => request.fetch_mode_no_cors(),
    }
}
