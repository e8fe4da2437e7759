//! Shared test utilities: in-memory data sources and row builders.
//!
//! # Sources
//!
//! | Source | Behaviour |
//! |--------|-----------|
//! | [`StaticSource`] | answers from fixed rows per collection, optionally failing some |
//! | [`FailingSource`] | rejects every query with one message |
//! | [`GatedSource`] | parks every query until the test releases it, in any order |
//!
//! All of them count calls so tests can assert that a query was (or was not)
//! issued.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = StaticSource::new()
//!     .with_rows(Collection::CaseStudies, vec![case_study_row("skyreal", 1, true)])
//!     .failing(Collection::GalleryItems, "network timeout");
//! ```

use crate::query::{Collection, Query};
use crate::source::{DataSource, SourceError};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

// =========================================================================
// Row builders
// =========================================================================

pub fn case_study_row(slug: &str, order_index: i64, is_active: bool) -> Value {
    json!({
        "id": format!("cs-{slug}"),
        "slug": slug,
        "title": format!("Case {slug}"),
        "year": 2024,
        "role": "Lead designer",
        "tools": ["Figma", "Miro"],
        "blurb": format!("Blurb for {slug}"),
        "hero_image_url": format!("/img/{slug}/hero.jpg"),
        "problem": "The **problem** statement.",
        "approach": ["Interview users", "Prototype"],
        "outcome": "Shipped.",
        "gallery_urls": [format!("/img/{slug}/1.jpg"), format!("/img/{slug}/2.jpg")],
        "process_steps": ["Discover", "Define"],
        "order_index": order_index,
        "is_active": is_active,
    })
}

pub fn experiment_row(id: &str, order_index: i64, is_active: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Experiment {id}"),
        "summary": "Tree test of the navigation.",
        "external_link": null,
        "order_index": order_index,
        "is_active": is_active,
    })
}

pub fn process_row(id: &str, category: &str, order_index: i64) -> Value {
    json!({
        "id": id,
        "category": category,
        "title": format!("Process {id}"),
        "description": "How the team works.",
        "overview": "An *overview*.",
        "steps": ["Plan", "Run", "Review"],
        "artifacts_links": ["https://example.com/board"],
        "pdf_url": "/pdf/process.pdf",
        "order_index": order_index,
        "is_active": true,
    })
}

pub fn research_row(id: &str, order_index: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Study {id}"),
        "context": "Checkout drop-off.",
        "method": "Moderated usability test",
        "key_insight": "Users missed the CTA.",
        "notes_link": null,
        "order_index": order_index,
        "is_active": true,
    })
}

pub fn gallery_row(id: &str, section: &str, order_index: i64) -> Value {
    json!({
        "id": id,
        "image_url": format!("/gallery/{id}.jpg"),
        "caption": format!("Caption {id}"),
        "alt_text": format!("Alt {id}"),
        "section": section,
        "order_index": order_index,
        "is_active": true,
    })
}

pub fn metadata_row() -> Value {
    json!({
        "id": "meta",
        "site_title": "Ana Ribeiro",
        "tagline": "Product designer",
        "email": "ana@example.com",
        "location": "Lisbon",
        "country": "Portugal",
        "resume_url": "/cv.pdf",
        "order_index": 0,
    })
}

// =========================================================================
// Sources
// =========================================================================

/// Answers queries from fixed rows, applying the query like the snapshot does.
#[derive(Default)]
pub struct StaticSource {
    rows: HashMap<Collection, Vec<Value>>,
    failures: HashMap<Collection, String>,
    raw: bool,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, collection: Collection, rows: Vec<Value>) -> Self {
        self.rows.insert(collection, rows);
        self
    }

    pub fn failing(mut self, collection: Collection, message: &str) -> Self {
        self.failures.insert(collection, message.to_string());
        self
    }

    /// Return rows untouched, ignoring filters and order, like a backend that
    /// does not honour the query.
    pub fn unfiltered(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.get(&query.collection) {
            return Err(SourceError::Unavailable(message.clone()));
        }
        let rows = self.rows.get(&query.collection).cloned().unwrap_or_default();
        if self.raw {
            Ok(rows)
        } else {
            Ok(query.apply(rows))
        }
    }

    fn describe(&self) -> String {
        "static test source".to_string()
    }
}

/// Rejects every query with the same message.
pub struct FailingSource {
    message: String,
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FailingSource {
    async fn select(&self, _query: &Query) -> Result<Vec<Value>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::Unavailable(self.message.clone()))
    }

    fn describe(&self) -> String {
        "failing test source".to_string()
    }
}

type Reply = oneshot::Sender<Result<Vec<Value>, SourceError>>;

/// Parks each query until the test calls [`GatedSource::release`].
///
/// Lets a test resolve in-flight requests in any order to reproduce
/// out-of-order network responses.
#[derive(Default)]
pub struct GatedSource {
    pending: Mutex<Vec<(Query, Reply)>>,
}

impl GatedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Wait (cooperatively) until `n` queries are parked.
    pub async fn wait_for(&self, n: usize) {
        while self.pending() < n {
            tokio::task::yield_now().await;
        }
    }

    /// Resolve the parked query whose `field` filter equals `value`.
    pub fn release(&self, field: &str, value: &str, result: Result<Vec<Value>, SourceError>) {
        let mut pending = self.pending.lock().unwrap();
        let pos = pending
            .iter()
            .position(|(q, _)| q.filter_text(field) == Some(value))
            .unwrap_or_else(|| panic!("no parked query with {field}={value}"));
        let (_, reply) = pending.remove(pos);
        let _ = reply.send(result);
    }
}

#[async_trait]
impl DataSource for GatedSource {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, SourceError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push((query.clone(), tx));
        rx.await
            .unwrap_or_else(|_| Err(SourceError::Unavailable("gate dropped".into())))
    }

    fn describe(&self) -> String {
        "gated test source".to_string()
    }
}
