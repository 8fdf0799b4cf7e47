pub mod use_call;
pub mod use_request_state;

pub use use_call::{
    UseCallHandle, use_call, use_delete, use_get, use_patch, use_post, use_put,
};
pub use use_request_state::{ReducerHandle, UseRequestState, use_request_state};
