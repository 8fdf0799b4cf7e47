use std::rc::Rc;

use client::CallResult;
use yew::prelude::*;

/// What a successful [`crate::ResultPresenter`] hands to its consumers.
pub struct LoadedResult<E> {
    pub result: Rc<CallResult<E>>,
    pub reload: Callback<()>,
}

impl<E> Clone for LoadedResult<E> {
    fn clone(&self) -> Self {
        Self {
            result: self.result.clone(),
            reload: self.reload.clone(),
        }
    }
}

impl<E> PartialEq for LoadedResult<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.result, &other.result) && self.reload == other.reload
    }
}

/// Read the result provided by the nearest context-mode presenter for `E`.
#[hook]
pub fn use_loaded_result<E: 'static>() -> LoadedResult<E> {
    use_context::<LoadedResult<E>>().expect(
        "use_loaded_result must be used below a ResultPresenter in context mode",
    )
}
