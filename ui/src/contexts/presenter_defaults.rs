use std::rc::Rc;

use client::CallResult;
use yew::prelude::*;

/// Fallback renderers for presenters of `E` that do not supply their own.
pub struct PresenterDefaults<E> {
    pub render_loading: Option<Callback<(), Html>>,
    /// Receives the whole failed result, status code and extension included.
    pub render_error: Option<Callback<Rc<CallResult<E>>, Html>>,
}

impl<E> Default for PresenterDefaults<E> {
    fn default() -> Self {
        Self {
            render_loading: None,
            render_error: None,
        }
    }
}

impl<E> Clone for PresenterDefaults<E> {
    fn clone(&self) -> Self {
        Self {
            render_loading: self.render_loading.clone(),
            render_error: self.render_error.clone(),
        }
    }
}

impl<E> PartialEq for PresenterDefaults<E> {
    fn eq(&self, other: &Self) -> bool {
        self.render_loading == other.render_loading
            && self.render_error == other.render_error
    }
}

#[derive(Properties, PartialEq)]
pub struct PresenterDefaultsProviderProps<E: PartialEq + 'static> {
    #[prop_or_default]
    pub render_loading: Option<Callback<(), Html>>,
    #[prop_or_default]
    pub render_error: Option<Callback<Rc<CallResult<E>>, Html>>,
    pub children: Children,
}

/// Provides defaults to every `ResultPresenter<E>` below it. Presenters of a
/// different extension type do not see them.
#[function_component]
pub fn PresenterDefaultsProvider<E>(
    props: &PresenterDefaultsProviderProps<E>,
) -> Html
where
    E: PartialEq + 'static,
{
    let defaults = PresenterDefaults {
        render_loading: props.render_loading.clone(),
        render_error: props.render_error.clone(),
    };

    html! {
        <ContextProvider<PresenterDefaults<E>> context={defaults}>
            {props.children.clone()}
        </ContextProvider<PresenterDefaults<E>>>
    }
}

/// Defaults from the nearest provider for `E`, or none outside of one.
#[hook]
pub fn use_presenter_defaults<E: 'static>() -> PresenterDefaults<E> {
    use_context::<PresenterDefaults<E>>().unwrap_or_default()
}
