//! Caller-owned request state for orchestrating calls by hand.

use std::cell::RefCell;
use std::rc::Rc;

use crate::CallResult;

/// Sink receiving the lifecycle of one call.
///
/// [`crate::ApiClient::call`] invokes `start_request` before dispatch and
/// `finish_request` exactly once after the call settles.
pub trait RequestStateHandle<E> {
    fn start_request(&self);
    fn finish_request(&self, result: CallResult<E>);
}

pub enum HandleAction<E> {
    Start,
    Finish(CallResult<E>),
    Reset,
}

/// Loading/result pair driven by start and finish events. Unlike the hook
/// lifecycle there is no generation tracking: the last finish wins.
#[derive(Debug)]
pub struct DetachedRequestState<E> {
    loading: bool,
    result: Option<Rc<CallResult<E>>>,
    reset_result_on_refresh: bool,
}

impl<E> Clone for DetachedRequestState<E> {
    fn clone(&self) -> Self {
        Self {
            loading: self.loading,
            result: self.result.clone(),
            reset_result_on_refresh: self.reset_result_on_refresh,
        }
    }
}

impl<E> Default for DetachedRequestState<E> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<E> DetachedRequestState<E> {
    pub fn new(reset_result_on_refresh: bool) -> Self {
        Self {
            loading: false,
            result: None,
            reset_result_on_refresh,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&Rc<CallResult<E>>> {
        self.result.as_ref()
    }

    pub fn reset_result_on_refresh(&self) -> bool {
        self.reset_result_on_refresh
    }

    pub fn apply(&mut self, action: HandleAction<E>) {
        match action {
            HandleAction::Start => {
                self.loading = true;
                if self.reset_result_on_refresh {
                    self.result = None;
                }
            }
            HandleAction::Finish(result) => {
                self.loading = false;
                self.result = Some(Rc::new(result));
            }
            HandleAction::Reset => {
                self.loading = false;
                self.result = None;
            }
        }
    }
}

/// A [`RequestStateHandle`] for callers outside a component tree.
pub struct SharedRequestState<E>(Rc<RefCell<DetachedRequestState<E>>>);

impl<E> Clone for SharedRequestState<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> SharedRequestState<E> {
    pub fn new(reset_result_on_refresh: bool) -> Self {
        Self(Rc::new(RefCell::new(DetachedRequestState::new(
            reset_result_on_refresh,
        ))))
    }

    pub fn loading(&self) -> bool {
        self.0.borrow().loading()
    }

    pub fn result(&self) -> Option<Rc<CallResult<E>>> {
        self.0.borrow().result().cloned()
    }

    pub fn reset(&self) {
        self.0.borrow_mut().apply(HandleAction::Reset);
    }
}

impl<E> RequestStateHandle<E> for SharedRequestState<E> {
    fn start_request(&self) {
        self.0.borrow_mut().apply(HandleAction::Start);
    }

    fn finish_request(&self, result: CallResult<E>) {
        self.0.borrow_mut().apply(HandleAction::Finish(result));
    }
}
