use std::rc::Rc;

use client::presenter::{
    Branch, ConsumerMode, DEFAULT_LOADING_TEXT, default_error_text,
    validate_consumer,
};
use client::{ApiClient, CallResult, Method};
use serde_json::Value;
use yew::prelude::*;

use crate::contexts::{LoadedResult, PresenterDefaults, use_presenter_defaults};
use crate::hooks::{UseCallHandle, use_call};

#[derive(Properties, PartialEq, Clone)]
pub struct ResultPresenterProps<E: PartialEq + 'static> {
    pub client: ApiClient<E>,
    pub endpoint: AttrValue,
    #[prop_or_default]
    pub method: Method,
    #[prop_or_default]
    pub body: Option<Value>,
    pub consumer: ConsumerMode,
    /// Required in inline mode.
    #[prop_or_default]
    pub render: Option<Callback<LoadedResult<E>, Html>>,
    #[prop_or_default]
    pub render_loading: Option<Callback<(), Html>>,
    #[prop_or_default]
    pub render_error: Option<Callback<Rc<CallResult<E>>, Html>>,
    /// Rendered below the context provider in context mode.
    #[prop_or_default]
    pub children: Children,
}

/// Loads one endpoint and renders its loading, error or success state.
///
/// In [`ConsumerMode::Inline`] the `render` callback receives the result and a
/// reload callback. In [`ConsumerMode::Context`] the same pair is provided as
/// context and `children` read it with
/// [`crate::contexts::use_loaded_result`].
///
/// Loading and error rendering fall back from the props, to the nearest
/// [`crate::contexts::PresenterDefaultsProvider`], to plain text.
///
/// # Panics
///
/// In inline mode without a `render` callback, before anything is rendered.
#[function_component]
pub fn ResultPresenter<E>(props: &ResultPresenterProps<E>) -> Html
where
    E: Clone + PartialEq + 'static,
{
    if let Err(error) = validate_consumer(props.consumer, props.render.is_some()) {
        panic!("ResultPresenter for {}: {error}", props.endpoint);
    }

    let defaults = use_presenter_defaults::<E>();
    let UseCallHandle {
        result,
        is_loading,
        reload,
    } = use_call(
        props.client.clone(),
        props.method,
        props.endpoint.clone(),
        props.body.clone(),
    );

    render_branch(
        props,
        &defaults,
        Branch::select(result.as_ref(), is_loading),
        reload,
    )
}

/// Markup for one presenter state. Overrides in `props` win over `defaults`,
/// which win over the built-in text.
pub fn render_branch<E>(
    props: &ResultPresenterProps<E>,
    defaults: &PresenterDefaults<E>,
    branch: Branch<'_, E>,
    reload: Callback<()>,
) -> Html
where
    E: Clone + PartialEq + 'static,
{
    match branch {
        Branch::Loading => {
            match props
                .render_loading
                .as_ref()
                .or(defaults.render_loading.as_ref())
            {
                Some(render) => render.emit(()),
                None => html! { <span>{DEFAULT_LOADING_TEXT}</span> },
            }
        }
        Branch::Error(result) => {
            match props.render_error.as_ref().or(defaults.render_error.as_ref()) {
                Some(render) => render.emit(result.clone()),
                None => html! { <span>{default_error_text(result)}</span> },
            }
        }
        Branch::Success(result) => {
            let loaded = LoadedResult {
                result: result.clone(),
                reload,
            };
            match (props.consumer, &props.render) {
                (ConsumerMode::Inline, Some(render)) => render.emit(loaded),
                (ConsumerMode::Inline, None) => Html::default(),
                (ConsumerMode::Context, _) => html! {
                    <ContextProvider<LoadedResult<E>> context={loaded}>
                        {props.children.clone()}
                    </ContextProvider<LoadedResult<E>>>
                },
            }
        }
    }
}
