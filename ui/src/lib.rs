//! Yew bindings for the `client` crate: request hooks, a result presenter and
//! the contexts they share.

pub mod components;
pub mod contexts;
pub mod hooks;
pub mod logs;

pub use client::presenter::ConsumerMode;
pub use client::{ApiClient, CallResult, ClientOptions, Method};
pub use components::{ResultPresenter, ResultPresenterProps};
pub use contexts::{
    LoadedResult, PresenterDefaults, PresenterDefaultsProvider,
    use_loaded_result, use_presenter_defaults,
};
pub use hooks::{
    ReducerHandle, UseCallHandle, UseRequestState, use_call, use_delete,
    use_get, use_patch, use_post, use_put, use_request_state,
};

/// Base URL for API clients: `API_BASE_URL` at build time, otherwise the
/// origin of the current page.
pub fn default_base_url() -> String {
    option_env!("API_BASE_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_default()
        })
}
