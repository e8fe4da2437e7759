//! Fetch state for one query at a time, with a stale-result guard.
//!
//! A [`Resource`] is the data-loading hook of a page: it owns the
//! `{ data, loading, error }` triple for exactly one [`Loader`] and is driven
//! by [`Resource::observe`] each time the page's query parameter is known.
//!
//! # Lifecycle
//!
//! ```text
//!             observe(p)                        source resolves
//!   initial ───────────► loading=true ───────────────────────────► loading=false
//!   loading=true         error=None       Ok(rows)  → data=rows, error=None
//!   data=empty                            Err(e)    → data=empty, error=Some(e)
//! ```
//!
//! # Stale results
//!
//! Every issued query takes a [`Ticket`] stamped with a generation number.
//! Issuing a new query (or switching to a parameter that needs no query)
//! bumps the generation, and [`Resource::commit`] drops any result whose
//! ticket is no longer current. Nothing is cancelled: a superseded request
//! still runs to completion, its outcome just never lands.
//!
//! # Threading
//!
//! Resources use `Cell`/`RefCell` and are meant to be driven from a single
//! task (several of them concurrently through `join!`). No borrow is held
//! across an await point.

use crate::query::Query;
use crate::source::{DataSource, SourceError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// The one failure kind a page ever sees: a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SourceError> for FetchError {
    fn from(err: SourceError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed record: {err}"))
    }
}

/// Result payload of a loader: a list or an optional single record.
pub trait Payload: Default + Clone {
    fn is_empty(&self) -> bool;
}

impl<T: Clone> Payload for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T: Clone> Payload for Option<T> {
    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

/// What a page can observe about one query.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
        }
    }
}

/// The four ways a section can render.
#[derive(Debug, PartialEq)]
pub enum Outcome<'a, T> {
    Loading,
    Failed(&'a FetchError),
    Empty,
    Ready(&'a T),
}

impl<T: Payload> FetchState<T> {
    /// Classify the state for rendering. An error wins over data, and an
    /// empty result is distinct from a failure.
    pub fn outcome(&self) -> Outcome<'_, T> {
        if let Some(err) = &self.error {
            Outcome::Failed(err)
        } else if self.loading {
            Outcome::Loading
        } else if self.data.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Ready(&self.data)
        }
    }

    /// Finished state holding `data`.
    pub fn ready(data: T) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    /// Finished state holding `error` and the empty payload.
    pub fn failed(error: FetchError) -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: Some(error),
        }
    }
}

/// One typed query: how a parameter becomes a [`Query`] and how rows become
/// the payload.
pub trait Loader {
    type Param: Clone + PartialEq + fmt::Debug;
    type Output: Payload;

    /// Name used in logs and CLI output.
    const LABEL: &'static str;

    /// The query for `param`, or `None` when the parameter cannot identify
    /// anything and no query should be issued.
    fn query(param: &Self::Param) -> Option<Query>;

    /// Decode rows that already passed [`Query::apply`].
    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError>;
}

/// Proof that a query was issued at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// The data-loading hook for one [`Loader`].
pub struct Resource<L: Loader> {
    state: RefCell<FetchState<L::Output>>,
    param: RefCell<Option<L::Param>>,
    generation: Cell<u64>,
    idle: Cell<bool>,
}

impl<L: Loader> Default for Resource<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Loader> Resource<L> {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FetchState::default()),
            param: RefCell::new(None),
            generation: Cell::new(0),
            idle: Cell::new(false),
        }
    }

    /// Current state (cloned).
    pub fn state(&self) -> FetchState<L::Output> {
        self.state.borrow().clone()
    }

    /// The parameter last observed.
    pub fn param(&self) -> Option<L::Param> {
        self.param.borrow().clone()
    }

    /// True when the current parameter needs no query, so the resource will
    /// stay loading until it gets one that does.
    pub fn is_idle(&self) -> bool {
        self.idle.get()
    }

    /// Run the query for `param` unless it is the parameter already observed.
    pub async fn observe(&self, source: &dyn DataSource, param: L::Param) {
        if self.param.borrow().as_ref() == Some(&param) {
            return;
        }
        self.reload(source, param).await;
    }

    /// Run the query for `param` unconditionally.
    pub async fn reload(&self, source: &dyn DataSource, param: L::Param) {
        *self.param.borrow_mut() = Some(param.clone());
        let Some(query) = L::query(&param) else {
            self.supersede();
            self.idle.set(true);
            debug!(loader = L::LABEL, ?param, "no query for parameter");
            return;
        };
        let ticket = self.begin();
        debug!(loader = L::LABEL, %query, "fetching");
        let result = match source.select(&query).await {
            Ok(rows) => L::decode(query.apply(rows)),
            Err(err) => Err(err.into()),
        };
        self.commit(ticket, result);
    }

    /// Mark a new query as in flight and return its ticket.
    pub fn begin(&self) -> Ticket {
        let ticket = self.supersede();
        self.idle.set(false);
        let mut state = self.state.borrow_mut();
        state.loading = true;
        state.error = None;
        ticket
    }

    /// Store `result` if `ticket` is still current. Returns whether it landed.
    pub fn commit(&self, ticket: Ticket, result: Result<L::Output, FetchError>) -> bool {
        if ticket.generation != self.generation.get() {
            debug!(
                loader = L::LABEL,
                stale = ticket.generation,
                current = self.generation.get(),
                "discarding superseded result"
            );
            return false;
        }
        let mut state = self.state.borrow_mut();
        match result {
            Ok(data) => {
                state.data = data;
                state.error = None;
            }
            Err(err) => {
                warn!(loader = L::LABEL, error = %err, "fetch failed");
                state.data = Default::default();
                state.error = Some(err);
            }
        }
        state.loading = false;
        true
    }

    fn supersede(&self) -> Ticket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        Ticket { generation }
    }
}

/// Run a loader once without keeping a resource around.
pub async fn fetch_once<L: Loader>(
    source: &dyn DataSource,
    param: L::Param,
) -> FetchState<L::Output> {
    let resource = Resource::<L>::new();
    resource.observe(source, param).await;
    resource.state()
}

/// Decode every row as `R`.
pub fn decode_list<R: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<R>, FetchError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(FetchError::from))
        .collect()
}

/// Decode at most one row as `R`; more than one is a failure.
pub fn decode_single<R: DeserializeOwned>(rows: Vec<Value>) -> Result<Option<R>, FetchError> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), count) {
        (None, _) => Ok(None),
        (Some(row), 1) => Ok(Some(serde_json::from_value(row)?)),
        (Some(_), n) => Err(FetchError::new(format!(
            "expected at most one row, got {n}"
        ))),
    }
}
