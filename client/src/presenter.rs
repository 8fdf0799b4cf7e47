//! Branch selection for the result presenter component.

use std::rc::Rc;

use crate::{CallResult, ConfigError};

pub const DEFAULT_LOADING_TEXT: &str = "Loading...";

/// How a presenter hands a successful result to its consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerMode {
    /// A render callback receives the result and a reload callback.
    Inline,
    /// The result and reload callback are provided to descendants as context.
    Context,
}

/// Fails when inline mode has nothing to render with.
pub fn validate_consumer(
    mode: ConsumerMode,
    has_render: bool,
) -> Result<(), ConfigError> {
    match mode {
        ConsumerMode::Inline if !has_render => {
            Err(ConfigError::InlineRenderMissing)
        }
        _ => Ok(()),
    }
}

#[derive(Debug)]
pub enum Branch<'a, E> {
    Loading,
    Error(&'a Rc<CallResult<E>>),
    Success(&'a Rc<CallResult<E>>),
}

impl<'a, E> Branch<'a, E> {
    pub fn select(
        result: Option<&'a Rc<CallResult<E>>>,
        is_loading: bool,
    ) -> Self {
        match result {
            Some(result) if !is_loading => {
                if result.has_succeeded() {
                    Branch::Success(result)
                } else {
                    Branch::Error(result)
                }
            }
            _ => Branch::Loading,
        }
    }
}

pub fn default_error_text<E>(result: &CallResult<E>) -> String {
    format!("Error: {}", result.error_message().unwrap_or("Unknown error"))
}
