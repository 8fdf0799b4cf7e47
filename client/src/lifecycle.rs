//! State machine behind the `use_call` hook.
//!
//! A [`RequestState`] belongs to one mounted hook instance. Every state change
//! goes through [`RequestState::apply`], which returns `None` when the
//! transition must not be observed (stale or redundant) so the host can skip
//! both the write and the re-render.

use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{AbortHandle, Abortable};
use serde_json::Value;

use crate::{ApiClient, CallResult, Method};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Settled,
}

#[derive(Debug)]
pub enum Transition<E> {
    /// A call for `generation` is being dispatched.
    Begin { generation: u64 },
    /// Discard the current result and start a new generation.
    Reload,
    /// The call for `generation` settled.
    Settle { generation: u64, result: CallResult<E> },
}

#[derive(Debug)]
pub struct RequestState<E> {
    phase: Phase,
    generation: u64,
    result: Option<Rc<CallResult<E>>>,
}

impl<E> Default for RequestState<E> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            result: None,
        }
    }
}

impl<E> Clone for RequestState<E> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase,
            generation: self.generation,
            result: self.result.clone(),
        }
    }
}

impl<E> RequestState<E> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> Option<&Rc<CallResult<E>>> {
        self.result.as_ref()
    }

    /// Idle counts as loading: a mounted hook always has a call on the way.
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Settled
    }

    pub fn apply(&self, transition: Transition<E>) -> Option<Self> {
        match transition {
            Transition::Begin { generation } => {
                if generation != self.generation || self.phase == Phase::Loading
                {
                    return None;
                }
                Some(Self {
                    phase: Phase::Loading,
                    generation,
                    result: None,
                })
            }
            Transition::Reload => {
                tracing::trace!(generation = self.generation + 1, "reloading");
                Some(Self {
                    phase: Phase::Loading,
                    generation: self.generation + 1,
                    result: None,
                })
            }
            Transition::Settle { generation, result } => {
                if generation != self.generation || self.phase != Phase::Loading
                {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "discarding stale completion"
                    );
                    return None;
                }
                Some(Self {
                    phase: Phase::Settled,
                    generation,
                    result: Some(Rc::new(result)),
                })
            }
        }
    }
}

/// Everything that decides whether a mounted hook must issue a new call.
///
/// Hosts compare the key built on each render with the previous one and run
/// [`CallKey::start`] only when it changed: a new client, method, endpoint,
/// body or generation.
pub struct CallKey<E> {
    client: ApiClient<E>,
    method: Method,
    endpoint: String,
    body: Option<Value>,
    generation: u64,
}

impl<E> Clone for CallKey<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            method: self.method,
            endpoint: self.endpoint.clone(),
            body: self.body.clone(),
            generation: self.generation,
        }
    }
}

impl<E> PartialEq for CallKey<E> {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client
            && self.method == other.method
            && self.endpoint == other.endpoint
            && self.body == other.body
            && self.generation == other.generation
    }
}

impl<E> RequestState<E> {
    /// Key for calling `endpoint` in the current generation.
    pub fn call_key(
        &self,
        client: ApiClient<E>,
        method: Method,
        endpoint: impl Into<String>,
        body: Option<Value>,
    ) -> CallKey<E> {
        CallKey {
            client,
            method,
            endpoint: endpoint.into(),
            body,
            generation: self.generation,
        }
    }
}

impl<E: Clone + 'static> CallKey<E> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dispatch `Begin` for this key's generation and prepare the call.
    ///
    /// The returned future performs the call and dispatches `Settle` unless
    /// the guard was released first. The host spawns it on its local
    /// executor and releases the guard when the key changes or it unmounts.
    pub fn start<D>(self, dispatch: D) -> (CallGuard, impl Future<Output = ()>)
    where
        D: Fn(Transition<E>) + 'static,
    {
        let CallKey {
            client,
            method,
            endpoint,
            body,
            generation,
        } = self;
        dispatch(Transition::Begin { generation });

        let (guard, call) = CallGuard::new(async move {
            client.call(method, &endpoint, body.as_ref(), None).await
        });
        let settle = async move {
            match call.await {
                Some(result) => dispatch(Transition::Settle { generation, result }),
                None => {
                    tracing::trace!(generation, "call released before settling")
                }
            }
        };
        (guard, settle)
    }
}

/// Ties an in-flight call to the effect that started it.
///
/// Releasing the guard drops the wrapped future at its next poll, so its
/// output is never observed.
#[derive(Debug)]
pub struct CallGuard {
    handle: AbortHandle,
}

impl CallGuard {
    pub fn new<F: Future>(
        future: F,
    ) -> (Self, impl Future<Output = Option<F::Output>>) {
        let (handle, registration) = AbortHandle::new_pair();
        let guarded = Abortable::new(future, registration).map(Result::ok);
        (Self { handle }, guarded)
    }

    pub fn release(&self) {
        self.handle.abort();
    }
}
