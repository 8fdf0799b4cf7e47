use std::rc::Rc;

use client::lifecycle::{RequestState, Transition};
use client::{ApiClient, CallResult, Method};
use serde_json::Value;
use yew::prelude::*;

/// Reducer around the client's request state machine. Returning the same
/// `Rc` for rejected transitions is what keeps stale completions from
/// re-rendering.
struct CallState<E>(RequestState<E>);

impl<E> Default for CallState<E> {
    fn default() -> Self {
        Self(RequestState::default())
    }
}

impl<E: 'static> Reducible for CallState<E> {
    type Action = Transition<E>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match self.0.apply(action) {
            Some(next) => Rc::new(CallState(next)),
            None => self,
        }
    }
}

/// Call hook return type
pub struct UseCallHandle<E> {
    /// `None` until the current generation settles.
    pub result: Option<Rc<CallResult<E>>>,
    pub is_loading: bool,
    /// Discard the result and issue the call again.
    pub reload: Callback<()>,
}

/// Issue one call per `(client, method, endpoint, body)` and per reload, and
/// re-render once when it settles.
///
/// Completions from a superseded generation or from an unmounted component
/// are dropped: the effect cleanup releases the call's guard, and the reducer
/// rejects any settlement for a generation other than the current one.
///
/// # Example
///
/// ```ignore
/// #[function_component]
/// fn Today(props: &TodayProps) -> Html {
///     let today = use_call(
///         props.client.clone(),
///         Method::Get,
///         "/today".into(),
///         None,
///     );
///     match today.result {
///         Some(result) if !today.is_loading => html! {
///             <button onclick={today.reload.reform(|_| ())}>
///                 {format!("{:?}", result.extension())}
///             </button>
///         },
///         _ => html! { <span>{"Loading..."}</span> },
///     }
/// }
/// ```
#[hook]
pub fn use_call<E>(
    client: ApiClient<E>,
    method: Method,
    endpoint: AttrValue,
    body: Option<Value>,
) -> UseCallHandle<E>
where
    E: Clone + 'static,
{
    let state = use_reducer(CallState::<E>::default);
    let key = state.0.call_key(client, method, endpoint.to_string(), body);

    {
        let dispatcher = state.dispatcher();

        use_effect_with(key, move |key| {
            let (guard, settle) = key
                .clone()
                .start(move |transition| dispatcher.dispatch(transition));
            yew::platform::spawn_local(settle);

            move || guard.release()
        });
    }

    let reload = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| {
            dispatcher.dispatch(Transition::Reload);
        })
    };

    UseCallHandle {
        result: state.0.result().cloned(),
        is_loading: state.0.is_loading(),
        reload,
    }
}

#[hook]
pub fn use_get<E>(client: ApiClient<E>, endpoint: AttrValue) -> UseCallHandle<E>
where
    E: Clone + 'static,
{
    use_call(client, Method::Get, endpoint, None)
}

#[hook]
pub fn use_post<E>(
    client: ApiClient<E>,
    endpoint: AttrValue,
    body: Value,
) -> UseCallHandle<E>
where
    E: Clone + 'static,
{
    use_call(client, Method::Post, endpoint, Some(body))
}

#[hook]
pub fn use_put<E>(
    client: ApiClient<E>,
    endpoint: AttrValue,
    body: Value,
) -> UseCallHandle<E>
where
    E: Clone + 'static,
{
    use_call(client, Method::Put, endpoint, Some(body))
}

#[hook]
pub fn use_patch<E>(
    client: ApiClient<E>,
    endpoint: AttrValue,
    body: Value,
) -> UseCallHandle<E>
where
    E: Clone + 'static,
{
    use_call(client, Method::Patch, endpoint, Some(body))
}

#[hook]
pub fn use_delete<E>(
    client: ApiClient<E>,
    endpoint: AttrValue,
    body: Value,
) -> UseCallHandle<E>
where
    E: Clone + 'static,
{
    use_call(client, Method::Delete, endpoint, Some(body))
}
