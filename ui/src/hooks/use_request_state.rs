use std::rc::Rc;

use client::handle::{DetachedRequestState, HandleAction};
use client::{CallResult, RequestStateHandle};
use yew::prelude::*;

struct HandleState<E>(DetachedRequestState<E>);

impl<E: 'static> Reducible for HandleState<E> {
    type Action = HandleAction<E>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(HandleState(next))
    }
}

/// Component-owned [`RequestStateHandle`]. Pass it to
/// [`client::ApiClient::call`] or any verb method.
pub struct ReducerHandle<E: 'static> {
    dispatcher: UseReducerDispatcher<HandleState<E>>,
}

impl<E: 'static> Clone for ReducerHandle<E> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<E: 'static> PartialEq for ReducerHandle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.dispatcher == other.dispatcher
    }
}

impl<E: 'static> RequestStateHandle<E> for ReducerHandle<E> {
    fn start_request(&self) {
        self.dispatcher.dispatch(HandleAction::Start);
    }

    fn finish_request(&self, result: CallResult<E>) {
        self.dispatcher.dispatch(HandleAction::Finish(result));
    }
}

pub struct UseRequestState<E: 'static> {
    pub handle: ReducerHandle<E>,
    pub loading: bool,
    pub result: Option<Rc<CallResult<E>>>,
    /// Return to the idle state.
    pub reset: Callback<()>,
}

/// Request state for calls the component issues itself, e.g. from a form
/// submit. Each call started with the handle sets `loading`, and clears the
/// previous result when `reset_result_on_refresh` is true. The last call to
/// finish wins.
#[hook]
pub fn use_request_state<E>(reset_result_on_refresh: bool) -> UseRequestState<E>
where
    E: 'static,
{
    let state = use_reducer(move || {
        HandleState(DetachedRequestState::new(reset_result_on_refresh))
    });

    let reset = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| {
            dispatcher.dispatch(HandleAction::Reset);
        })
    };

    UseRequestState {
        handle: ReducerHandle {
            dispatcher: state.dispatcher(),
        },
        loading: state.0.loading(),
        result: state.0.result().cloned(),
        reset,
    }
}
