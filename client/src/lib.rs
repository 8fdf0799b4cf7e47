//! HTTP calls normalized into a uniform result shape, plus the state machines
//! that bind those calls to a component's render cycle.

mod api_client;
pub mod handle;
pub mod lifecycle;
mod options;
pub mod presenter;
mod result;

pub use api_client::{ApiClient, Method};
pub use handle::{RequestStateHandle, SharedRequestState};
pub use options::{
    ClientOptions, ClientOptionsBuilder, ConfigError, CredentialsMode,
    ErrorClassifier, ErrorMapper, RequestMode, SuccessMapper,
    TransportOptions, TransportSource,
};
pub use result::{CallError, CallResult, MapError};
