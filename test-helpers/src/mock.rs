//! Extension fields and handles used across the client tests.

use std::cell::RefCell;

use client::{
    ApiClient, CallResult, ClientOptions, ClientOptionsBuilder,
    RequestStateHandle,
};
use serde::Deserialize;

/// Domain fields mapped out of fixture responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Fields {
    pub date: Option<String>,
    pub error_code: Option<String>,
}

/// Options for a `Fields` client, left open for further configuration.
pub fn fields_options(address: &str) -> ClientOptionsBuilder<Fields> {
    ClientOptions::<Fields>::builder(address)
        .success_mapper(|body| Ok(serde_json::from_value(body.clone())?))
        .error_mapper(|error| Fields {
            date: None,
            error_code: error.code().map(str::to_string),
        })
}

pub fn fields_client(address: &str) -> ApiClient<Fields> {
    ApiClient::new(fields_options(address).build().unwrap())
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandleEvent {
    Start,
    Finish(CallResult<Fields>),
}

/// Records every lifecycle event it receives, in order.
#[derive(Default)]
pub struct RecordingHandle {
    events: RefCell<Vec<HandleEvent>>,
}

impl RecordingHandle {
    pub fn events(&self) -> Vec<HandleEvent> {
        self.events.borrow().clone()
    }
}

impl RequestStateHandle<Fields> for RecordingHandle {
    fn start_request(&self) {
        self.events.borrow_mut().push(HandleEvent::Start);
    }

    fn finish_request(&self, result: CallResult<Fields>) {
        self.events.borrow_mut().push(HandleEvent::Finish(result));
    }
}
