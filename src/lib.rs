//! # Folio
//!
//! A static portfolio site builder whose content lives in a hosted database.
//! Case studies, experiments, process write-ups, research cases, gallery
//! images and site metadata are rows in six tables behind a PostgREST
//! endpoint; Folio queries them, keeps only the published ones, and renders
//! a plain HTML site.
//!
//! # Architecture: Query → State → Page
//!
//! ```text
//! 1. Source    live REST endpoint or JSON snapshot      (rows as JSON)
//! 2. Fetch     one typed Resource per page section      (FetchState<T>)
//! 3. Generate  FetchState → markup, widgets → DOM state (dist/)
//! ```
//!
//! Every section owns its own fetch state: data, loading flag, error. A
//! failing query only ever shows up in its own section. Empty collections
//! render an empty-state message, never an error.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | `DataSource` trait, REST client, snapshot document |
//! | [`query`] | Closed `Collection` enum and the filter/order/limit `Query` |
//! | [`records`] | Typed row shapes for each collection |
//! | [`fetch`] | `Resource` state container with stale-result guard |
//! | [`hooks`] | One `Loader` per content query |
//! | [`site`] | Fetches every section of the site concurrently |
//! | [`routes`] | URL table and output file layout |
//! | [`widgets`] | Lightbox, bento gallery, accordion, expandable card |
//! | [`generate`] | Renders pages with Maud |
//! | [`config`] | Layered `folio.toml` + environment loading and validation |
//! | [`naming`] | Slugs and unique DOM region ids |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Published Means Active And Ordered
//!
//! Every list query filters on `is_active = true` and sorts by ascending
//! `order_index`. The filter and order are sent to the backend *and*
//! re-applied to whatever comes back, so a backend that ignores them (or a
//! snapshot) still yields the same published list.
//!
//! ## Latest Request Wins
//!
//! A [`fetch::Resource`] tags each request with a generation. When the
//! parameter changes while a request is in flight, the older response is
//! discarded on arrival, whatever order the responses land in.
//!
//! ## One Schema
//!
//! The live tables are the only schema. A snapshot (`folio snapshot`) is a
//! dump of the same tables and goes through the same query code, which makes
//! offline builds and tests use exactly what production would.

pub mod config;
pub mod fetch;
pub mod generate;
pub mod hooks;
pub mod naming;
pub mod output;
pub mod query;
pub mod records;
pub mod routes;
pub mod site;
pub mod source;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;
