//! CLI output formatting for every command.
//!
//! # Section-First Display
//!
//! Output is organised by **site section**, not by table or file. Each
//! section shows its fetch state first, then its entries by positional index
//! and title, with secondary context (slug, category, link) on indented
//! lines. A failed section prints its error in place of entries, so a build
//! log reads the same way the generated pages do.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Metadata: ready
//!     Ana Ribeiro
//! Case studies: ready (2)
//! 001 SkyReal VR
//!     Slug: skyreal
//! 002 Atlas
//!     Slug: atlas
//! Gallery (Brand/Web): failed
//!     Error: network timeout
//! Research: empty
//!
//! 1 of 7 sections failed
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Work → work/index.html
//!     SkyReal VR → work/skyreal/index.html
//!
//! Generated 10 pages
//!
//! Failed: gallery (network timeout)
//! ```
//!
//! ## Snapshot
//!
//! ```text
//! 001 case_studies (4 rows)
//! 002 ia_experiments (2 rows)
//!
//! Wrote snapshot → content.json
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::fetch::{FetchState, Outcome, Payload};
use crate::generate::GeneratedPage;
use crate::records::Record;
use crate::routes::Route;
use crate::site::SiteContent;
use crate::source::Snapshot;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Section header with its state, plus the error line when it failed.
///
/// ```text
/// Case studies: ready (2)
/// Gallery (Brand/Web): failed
///     Error: network timeout
/// ```
fn state_header<T: Payload>(
    label: &str,
    state: &FetchState<T>,
    count: impl Fn(&T) -> Option<usize>,
) -> Vec<String> {
    match state.outcome() {
        Outcome::Loading => vec![format!("{}: loading", label)],
        Outcome::Failed(err) => vec![
            format!("{}: failed", label),
            format!("{}Error: {}", indent(1), err.message),
        ],
        Outcome::Empty => vec![format!("{}: empty", label)],
        Outcome::Ready(data) => match count(data) {
            Some(n) => vec![format!("{}: ready ({})", label, n)],
            None => vec![format!("{}: ready", label)],
        },
    }
}

/// Numbered entries of a list section, each with optional context lines.
fn list_section<R: Record>(
    label: &str,
    state: &FetchState<Vec<R>>,
    context: impl Fn(&R) -> Vec<String>,
) -> Vec<String> {
    let mut lines = state_header(label, state, |rows| Some(rows.len()));
    if let Outcome::Ready(rows) = state.outcome() {
        for (i, row) in rows.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), row.label()));
            for line in context(row) {
                lines.push(format!("{}{}", indent(1), line));
            }
        }
    }
    lines
}

// ============================================================================
// Check
// ============================================================================

/// Format the fetched content of every section.
pub fn format_check_output(content: &SiteContent) -> Vec<String> {
    let mut lines = state_header("Metadata", &content.metadata, |_| None);
    if let Some(meta) = &content.metadata.data {
        lines.push(format!("{}{}", indent(1), meta.site_title));
        if !meta.tagline.is_empty() {
            lines.push(format!("{}{}", indent(1), truncate(&meta.tagline, 60)));
        }
    }

    lines.extend(list_section("Case studies", &content.case_studies, |case| {
        vec![format!("Slug: {}", case.slug)]
    }));
    lines.extend(list_section("Experiments", &content.experiments, |exp| {
        exp.external_link
            .iter()
            .map(|link| format!("Link: {}", link))
            .collect()
    }));
    lines.extend(list_section("Design Ops", &content.design_ops, |article| {
        vec![truncate(&article.description, 60)]
    }));
    lines.extend(list_section("Management", &content.management, |article| {
        vec![truncate(&article.description, 60)]
    }));
    lines.extend(list_section("Research", &content.research, |case| {
        vec![format!("Method: {}", case.method)]
    }));
    let gallery_label = format!("Gallery ({})", content.gallery_section);
    lines.extend(list_section(&gallery_label, &content.gallery, |_| Vec::new()));

    // detail queries are only listed when one of them went wrong
    for detail in &content.details {
        if detail.state.error.is_some() {
            lines.extend(state_header(
                &format!("Case study {}", detail.slug),
                &detail.state,
                |_| None,
            ));
        }
    }

    lines.push(String::new());
    let failures = content.failures();
    if failures.is_empty() {
        lines.push("All sections loaded".to_string());
    } else {
        let total = 7 + content.details.len();
        lines.push(format!("{} of {} sections failed", failures.len(), total));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(content: &SiteContent) {
    for line in format_check_output(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the list of generated pages, case study pages nested under Work.
pub fn format_generate_output(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        let depth = match page.route {
            Route::CaseStudy { .. } => 1,
            _ => 0,
        };
        lines.push(format!(
            "{}{} → {}",
            indent(depth),
            page.route.title(),
            page.file.display()
        ));
    }
    lines.push(String::new());
    let noun = if pages.len() == 1 { "page" } else { "pages" };
    lines.push(format!("Generated {} {}", pages.len(), noun));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(pages: &[GeneratedPage]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}

/// Format the sections that failed during a build, after a blank line.
/// Empty when every section loaded.
pub fn format_failures(content: &SiteContent) -> Vec<String> {
    let failures = content.failures();
    if failures.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new()];
    lines.extend(
        failures
            .into_iter()
            .map(|(section, err)| format!("Failed: {} ({})", section, err)),
    );
    lines
}

/// Print build failures to stdout.
pub fn print_failures(content: &SiteContent) {
    for line in format_failures(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Format the row counts of a captured snapshot.
pub fn format_snapshot_output(snapshot: &Snapshot, path: &Path) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .collections
        .iter()
        .enumerate()
        .map(|(i, (table, rows))| {
            let noun = if rows.len() == 1 { "row" } else { "rows" };
            format!("{} {} ({} {})", format_index(i + 1), table, rows.len(), noun)
        })
        .collect();
    lines.push(String::new());
    lines.push(format!("Wrote snapshot → {}", path.display()));
    lines
}

/// Print snapshot output to stdout.
pub fn print_snapshot_output(snapshot: &Snapshot, path: &Path) {
    for line in format_snapshot_output(snapshot, path) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
