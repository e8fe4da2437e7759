//! Slug and element-id generation from display titles.
//!
//! Content rows carry human titles ("Design Ops: Scaling a System") that have
//! to become stable HTML ids so accordion and expandable triggers can point
//! `aria-controls` at their content region. Every id on a rendered page goes
//! through this module so the mapping stays consistent between the widget
//! state and the markup.
//!
//! ## Slug Rules
//!
//! - ASCII letters are lowercased, digits are kept
//! - Any run of other characters becomes a single dash
//! - Leading and trailing dashes are stripped
//! - An empty result falls back to `"section"`
//!
//! ```text
//! "Design Ops: Scaling a System" → "design-ops-scaling-a-system"
//! "  Q&A  "                      → "q-a"
//! "✨"                           → "section"
//! ```

use std::collections::HashSet;

/// Convert a display title into a URL/id-safe slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Allocates unique content-region ids within one rendered page.
///
/// Two cards titled "Overview" on the same page get `content-overview` and
/// `content-overview-2`, so each trigger's `aria-controls` resolves to
/// exactly one region. Suffixes skip any id already issued, including one
/// that another title slugged to directly ("Overview 2").
#[derive(Debug, Default)]
pub struct RegionIds {
    issued: HashSet<String>,
}

impl RegionIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for a region titled `title`.
    pub fn allocate(&mut self, title: &str) -> String {
        let base = format!("content-{}", slugify(title));
        let mut id = base.clone();
        let mut n = 1;
        while self.issued.contains(&id) {
            n += 1;
            id = format!("{base}-{n}");
        }
        self.issued.insert(id.clone());
        id
    }
}
