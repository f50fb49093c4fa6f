use futures::future::{FutureExt, LocalBoxFuture};
use payloads::{ClientError, Listing, Resource};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::future::Future;
use std::rc::Rc;

use crate::messages::Messages;

/// Where a loader stands with respect to its most recent activation.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Constructed, never activated.
    Idle,
    Loading,
    /// The fetch succeeded. An empty collection is still a success; it is
    /// reported to the caller with the resource's empty-state message.
    Loaded(Vec<T>),
    Failed(LoadError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// What the caller of a loader observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSnapshot<T> {
    pub collection: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ResourceSnapshot<T> {
    /// Returns true if the last activation produced records.
    pub fn has_records(&self) -> bool {
        !self.collection.is_empty()
    }
}

type FetchFn<T> =
    dyn Fn() -> LocalBoxFuture<'static, Result<Listing<T>, ClientError>>;

/// Bookkeeping of the activations of one loader.
#[derive(Debug, Default)]
struct Activations {
    /// Generation handed to the most recent activation.
    issued: u64,
    /// Highest generation whose fetch has resolved.
    settled: u64,
    /// Activations still waiting on their fetch.
    in_flight: BTreeSet<u64>,
}

impl Activations {
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight.insert(self.issued);
        self.issued
    }

    /// A result may be applied only if no newer activation has resolved or
    /// is still waiting.
    fn is_current(&self, generation: u64) -> bool {
        generation > self.settled
            && self.in_flight.last() == Some(&generation)
    }

    fn settle(&mut self, generation: u64) {
        self.in_flight.remove(&generation);
        self.settled = self.settled.max(generation);
    }

    /// Forget an activation that was dropped before its fetch resolved.
    /// Returns true if nothing is left that could still set the state.
    fn abandon(&mut self, generation: u64) -> bool {
        let was_current = self.is_current(generation);
        self.in_flight.remove(&generation);
        let settled = self.settled;
        was_current && !self.in_flight.iter().any(|&g| g > settled)
    }
}

/// Returns the loader to `Idle` if its activation is dropped mid-fetch and
/// no other activation can finish the load.
struct ActivationGuard<'a, T> {
    loader: &'a ResourceLoader<T>,
    generation: u64,
    resolved: bool,
}

impl<T> Drop for ActivationGuard<'_, T> {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        let idle = self
            .loader
            .activations
            .borrow_mut()
            .abandon(self.generation);
        if idle {
            tracing::debug!(
                "{} activation {} dropped before completing",
                self.loader.resource,
                self.generation
            );
            self.loader.state.replace(LoadState::Idle);
        }
    }
}

/// Fetches a resource collection and tracks loading and error state.
///
/// Clones share the same state, so one handle can be rendered from while
/// another drives [`ResourceLoader::activate`]. Every activation takes a new
/// generation; a fetch that completes after a newer activation has started
/// is dropped instead of overwriting the newer result. Dropping an
/// activation future before it resolves puts the loader back to
/// [`LoadState::Idle`], unless an older activation is still in flight and
/// can finish the load instead.
///
/// # Example
///
/// ```rust,ignore
/// let client = Rc::new(get_api_client(&Config::from_env()?)?);
/// let movies = ResourceLoader::new(Resource::Movies, move || {
///     let client = client.clone();
///     async move { client.fetch_listing::<Movie>(Resource::Movies).await }
/// });
/// let snapshot = movies.activate().await;
/// ```
pub struct ResourceLoader<T> {
    resource: Resource,
    messages: Messages,
    fetch: Rc<FetchFn<T>>,
    state: Rc<RefCell<LoadState<T>>>,
    activations: Rc<RefCell<Activations>>,
}

impl<T> Clone for ResourceLoader<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            messages: self.messages.clone(),
            fetch: self.fetch.clone(),
            state: self.state.clone(),
            activations: self.activations.clone(),
        }
    }
}

impl<T: Clone + 'static> ResourceLoader<T> {
    pub fn new<F, Fut>(resource: Resource, fetch_fn: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<Listing<T>, ClientError>> + 'static,
    {
        Self {
            resource,
            messages: Messages::for_resource(resource),
            fetch: Rc::new(move || fetch_fn().boxed_local()),
            state: Rc::new(RefCell::new(LoadState::Idle)),
            activations: Rc::new(RefCell::new(Activations::default())),
        }
    }

    /// Replace the default messages for this resource.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Fetch the collection, replacing whatever the loader held before.
    ///
    /// Errors never escape: a failed fetch is reported through the
    /// snapshot's `error` field.
    pub async fn activate(&self) -> ResourceSnapshot<T> {
        let generation = self.activations.borrow_mut().begin();
        let mut guard = ActivationGuard {
            loader: self,
            generation,
            resolved: false,
        };
        self.state.replace(LoadState::Loading);

        tracing::debug!(
            "Loading {} (activation {generation})",
            self.resource
        );

        let result = (self.fetch)().await;

        guard.resolved = true;
        let is_current = {
            let mut activations = self.activations.borrow_mut();
            let is_current = activations.is_current(generation);
            activations.settle(generation);
            is_current
        };

        if !is_current {
            tracing::debug!(
                "Discarding {} result from superseded activation \
                 {generation}",
                self.resource
            );
            return self.snapshot();
        }

        let next = match result {
            Ok(listing) => {
                let collection = listing.into_collection();
                if collection.is_empty() {
                    tracing::info!("No {} available", self.resource);
                } else {
                    tracing::info!(
                        "Loaded {} {}",
                        collection.len(),
                        self.resource
                    );
                }
                LoadState::Loaded(collection)
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", self.resource);
                LoadState::Failed(e.into())
            }
        };
        self.state.replace(next);

        self.snapshot()
    }

    /// The caller-facing view of the current state.
    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        match &*self.state.borrow() {
            LoadState::Idle => ResourceSnapshot {
                collection: Vec::new(),
                loading: false,
                error: None,
            },
            LoadState::Loading => ResourceSnapshot {
                collection: Vec::new(),
                loading: true,
                error: None,
            },
            LoadState::Loaded(collection) if collection.is_empty() => {
                ResourceSnapshot {
                    collection: Vec::new(),
                    loading: false,
                    error: Some(self.messages.empty.to_string()),
                }
            }
            LoadState::Loaded(collection) => ResourceSnapshot {
                collection: collection.clone(),
                loading: false,
                error: None,
            },
            LoadState::Failed(_) => ResourceSnapshot {
                collection: Vec::new(),
                loading: false,
                error: Some(self.messages.failure.to_string()),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Run `f` against the underlying state, e.g. to inspect a failure.
    pub fn with_state<R>(&self, f: impl FnOnce(&LoadState<T>) -> R) -> R {
        f(&self.state.borrow())
    }
}
