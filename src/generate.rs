//! HTML site generation.
//!
//! Takes the fetched [`SiteContent`] and writes one static page per route.
//! Pages carry no logic of their own: each section maps its fetch state to
//! markup and hands rows to a widget.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero from metadata, section menu, latest work
//! - **Work** (`/work/index.html`): case study cards
//! - **Case study** (`/work/{slug}/index.html`): narrative + bento gallery
//! - **Experiments**, **Process**, **Management**, **Research**, **Gallery**
//! - **Not found** (`/404.html`)
//!
//! ## Section States
//!
//! Every fetched section renders one of four blocks, never two:
//!
//! | State | Markup |
//! |-------|--------|
//! | loading | `p.state-loading` |
//! | failed | `div.state-error role="alert"` with the message |
//! | empty | `p.state-empty` ("No … yet") |
//! | ready | the section's content |
//!
//! A failed section never stops the page, or any other page, from rendering.
//!
//! ## Widgets in Markup
//!
//! Widget state is rendered as the initial DOM state. Accordion and
//! expandable triggers carry `aria-expanded`/`aria-controls` from their
//! [`Disclosure`]; bento tiles carry their span as inline grid CSS and a
//! `data-index` the embedded script uses to open the lightbox. The script
//! (`static/portfolio.js`) binds the same keys the widget types handle.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! with narrative fields rendered from markdown by `pulldown-cmark`.

use crate::config::SiteConfig;
use crate::fetch::{FetchState, Outcome, Payload};
use crate::naming::RegionIds;
use crate::records::{
    CaseStudy, Experiment, GalleryItem, PortfolioMetadata, ProcessArticle, ProcessCategory,
    ResearchCase,
};
use crate::routes::{Route, is_safe_slug};
use crate::site::SiteContent;
use crate::widgets::{
    Accordion, BentoGallery, BentoLayout, Disclosure, Expandable, Lightbox, LightboxImage,
    Viewport,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid layout: {0}")]
    Layout(String),
}

/// A page written by [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub route: Route,
    pub file: PathBuf,
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/portfolio.js");

/// Number of case studies featured on the home page.
const LATEST_WORK: usize = 3;

/// Shared per-build rendering inputs.
struct Ctx<'a> {
    content: &'a SiteContent,
    layout: BentoLayout,
    site_title: String,
}

impl<'a> Ctx<'a> {
    fn new(content: &'a SiteContent, config: &SiteConfig) -> Result<Self, GenerateError> {
        let layout = config.layout.bento().ok_or_else(|| {
            GenerateError::Layout("layout.bento_spans must not be empty".to_string())
        })?;
        let site_title = content
            .metadata
            .data
            .as_ref()
            .map(|m| m.site_title.clone())
            .unwrap_or_else(|| config.site_title.clone());
        Ok(Self {
            content,
            layout,
            site_title,
        })
    }
}

/// Routes the site consists of, given what was fetched.
///
/// Case studies whose slug cannot be a single path segment get no detail
/// page; they are logged and skipped.
pub fn site_routes(content: &SiteContent) -> Vec<Route> {
    let mut routes = vec![Route::Home];
    routes.extend(Route::NAV);
    for detail in &content.details {
        if !is_safe_slug(&detail.slug) {
            warn!(slug = %detail.slug, "Skipping case study with unusable slug");
            continue;
        }
        routes.push(Route::CaseStudy {
            slug: detail.slug.clone(),
        });
    }
    routes.push(Route::NotFound);
    routes
}

/// Write every page to `output_dir`.
pub fn generate(
    content: &SiteContent,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let ctx = Ctx::new(content, config)?;
    fs::create_dir_all(output_dir)?;

    let mut pages = Vec::new();
    for route in site_routes(content) {
        let markup = render_route(&ctx, &route);
        let file = route.output_file();
        let path = output_dir.join(&file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, markup.into_string())?;
        pages.push(GeneratedPage { route, file });
    }
    Ok(pages)
}

/// Render a single route to markup.
pub fn render_page(
    route: &Route,
    content: &SiteContent,
    config: &SiteConfig,
) -> Result<Markup, GenerateError> {
    let ctx = Ctx::new(content, config)?;
    Ok(render_route(&ctx, route))
}

fn render_route(ctx: &Ctx, route: &Route) -> Markup {
    // widgets are page-scoped: fresh ids and a fresh viewport per page
    let mut ids = RegionIds::new();
    let viewport = Viewport::new();
    let (title, body) = match route {
        Route::Home => (ctx.site_title.clone(), render_home(ctx)),
        Route::CaseStudies => (
            route.title().to_string(),
            render_case_list(&ctx.content.case_studies),
        ),
        Route::CaseStudy { slug } => render_case_detail(ctx, slug, viewport),
        Route::Experiments => (
            route.title().to_string(),
            render_experiments(&ctx.content.experiments),
        ),
        Route::Process(category) => (
            route.title().to_string(),
            render_processes(ctx.content.processes(*category), *category, &mut ids),
        ),
        Route::Research => (
            route.title().to_string(),
            render_research(&ctx.content.research, &mut ids),
        ),
        Route::Gallery => (
            route.title().to_string(),
            render_gallery(ctx, viewport),
        ),
        Route::NotFound => (route.title().to_string(), render_not_found()),
    };
    let page_title = if matches!(route, Route::Home) {
        title
    } else {
        format!("{} · {}", title, ctx.site_title)
    };
    base_document(
        &page_title,
        html! {
            (site_header(&ctx.site_title, route))
            main { (body) }
            (site_footer(ctx.content.metadata.data.as_ref()))
        },
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the site header with navigation
fn site_header(site_title: &str, current: &Route) -> Markup {
    let current_path = current.path();
    html! {
        header.site-header {
            a.site-title href="/" { (site_title) }
            nav.site-nav aria-label="Main" {
                ul {
                    @for route in &Route::NAV {
                        @let path = route.path();
                        @let is_current = current_path.starts_with(&path);
                        li class=[is_current.then_some("current")] {
                            a href=(path) aria-current=[is_current.then_some("page")] {
                                (route.title())
                            }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(metadata: Option<&PortfolioMetadata>) -> Markup {
    html! {
        footer.site-footer {
            @if let Some(meta) = metadata {
                @if !meta.email.is_empty() {
                    a href={ "mailto:" (meta.email) } { (meta.email) }
                }
                @if let Some(location) = location_line(meta) {
                    span.location { (location) }
                }
            }
        }
    }
}

fn location_line(meta: &PortfolioMetadata) -> Option<String> {
    match (meta.location.is_empty(), meta.country.is_empty()) {
        (true, true) => None,
        (false, true) => Some(meta.location.clone()),
        (true, false) => Some(meta.country.clone()),
        (false, false) => Some(format!("{}, {}", meta.location, meta.country)),
    }
}

/// Render a fetched section according to its state.
fn section_state<T: Payload>(
    state: &FetchState<T>,
    what: &str,
    body: impl FnOnce(&T) -> Markup,
) -> Markup {
    match state.outcome() {
        Outcome::Loading => html! {
            p.state.state-loading { "Loading " (what) "…" }
        },
        Outcome::Failed(err) => html! {
            div.state.state-error role="alert" {
                p { "Error loading " (what) ". Please try again later." }
                p.error-detail { (err.message) }
            }
        },
        Outcome::Empty => html! {
            p.state.state-empty { "No " (what) " yet" }
        },
        Outcome::Ready(data) => body(data),
    }
}

fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

fn tags(items: &[String]) -> Markup {
    html! {
        @if !items.is_empty() {
            ul.tags {
                @for item in items {
                    li.tag { (item) }
                }
            }
        }
    }
}

/// Bento grid tiles followed by the lightbox they open.
fn render_bento(gallery: &BentoGallery, captions: &[&str]) -> Markup {
    html! {
        div.bento-gallery {
            @for tile in gallery.tiles() {
                figure.bento-tile
                    role="button"
                    tabindex="0"
                    data-index=(tile.index)
                    style=(tile.span.to_css())
                    aria-label={ "Open image " (tile.index + 1) " of " (gallery.tiles().len()) } {
                    img src=(tile.image.src) alt=(tile.image.alt) loading="lazy";
                    @if let Some(caption) = captions.get(tile.index).filter(|c| !c.is_empty()) {
                        figcaption { (caption) }
                    }
                }
            }
        }
        (render_lightbox(gallery.lightbox()))
    }
}

fn render_lightbox(lightbox: &Lightbox) -> Markup {
    let shown = lightbox.current().or_else(|| lightbox.images().first());
    html! {
        @if let Some(image) = shown {
            div.lightbox
                role="dialog"
                aria-modal="true"
                aria-label="Image viewer"
                data-count=(lightbox.len())
                hidden[!lightbox.is_open()] {
                button.lightbox-close type="button" data-action="close" aria-label="Close lightbox" { "×" }
                button.lightbox-nav.lightbox-prev type="button" data-action="prev" aria-label="Previous image" { "‹" }
                img.lightbox-image src=(image.src) alt=(image.alt);
                button.lightbox-nav.lightbox-next type="button" data-action="next" aria-label="Next image" { "›" }
            }
        }
    }
}

/// A disclosure trigger and its content region.
fn disclosure_block(
    class: &str,
    disclosure: &Disclosure,
    trigger: Markup,
    content: Markup,
) -> Markup {
    html! {
        div class=(class) data-expanded=(disclosure.aria_expanded()) {
            button.disclosure-trigger
                type="button"
                aria-expanded=(disclosure.aria_expanded())
                aria-controls=(disclosure.controls) {
                (trigger)
                span.chevron aria-hidden="true" { "⌄" }
            }
            div.disclosure-content id=(disclosure.controls) role="region" hidden[!disclosure.expanded] {
                (content)
            }
        }
    }
}

fn case_card(case: &CaseStudy) -> Markup {
    let route = Route::CaseStudy {
        slug: case.slug.clone(),
    };
    html! {
        article.case-card {
            a href=(route.path()) {
                @if let Some(hero) = &case.hero_image_url {
                    img src=(hero) alt=(case.title) loading="lazy";
                }
                h3 { (case.title) }
            }
            p.case-meta {
                @if let Some(year) = case.year { span.year { (year) } }
                @if !case.role.is_empty() { span.role { (case.role) } }
            }
            p.blurb { (case.blurb) }
            (tags(&case.tools))
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(ctx: &Ctx) -> Markup {
    let content = ctx.content;
    html! {
        section.hero {
            @match content.metadata.outcome() {
                Outcome::Ready(Some(meta)) => {
                    h1 { (meta.site_title) }
                    @if !meta.tagline.is_empty() { p.tagline { (meta.tagline) } }
                    @if let Some(resume) = &meta.resume_url {
                        a.button href=(resume) { "Download CV" }
                    }
                },
                Outcome::Failed(_) => {
                    h1 { (ctx.site_title) }
                    (section_state(&content.metadata, "profile", |_| html! {}))
                },
                _ => {
                    h1 { (ctx.site_title) }
                },
            }
        }
        section.bento-menu {
            h2 { "Explore My Work" }
            div.bento-grid {
                @for (i, route) in Route::NAV.iter().enumerate() {
                    a.bento-card href=(route.path()) style=(ctx.layout.span_for(i).to_css()) {
                        span.bento-title { (route.title()) }
                        span.bento-subtitle { (route.subtitle()) }
                    }
                }
            }
        }
        section.latest-work {
            h2 { "Latest Work" }
            (section_state(&content.case_studies, "case studies", |cases| html! {
                div.case-list {
                    @for case in cases.iter().take(LATEST_WORK) { (case_card(case)) }
                }
                a.more href=(Route::CaseStudies.path()) { "All work →" }
            }))
        }
    }
}

fn render_case_list(state: &FetchState<Vec<CaseStudy>>) -> Markup {
    html! {
        section.page-header { h1 { "Work" } }
        (section_state(state, "case studies", |cases| html! {
            div.case-list {
                @for case in cases { (case_card(case)) }
            }
        }))
    }
}

fn render_case_detail(ctx: &Ctx, slug: &str, viewport: Viewport) -> (String, Markup) {
    let state = ctx
        .content
        .detail(slug)
        .map(|d| d.state.clone())
        .unwrap_or_else(|| FetchState::ready(None));
    let title = state
        .data
        .as_ref()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| "Case study".to_string());

    let body = html! {
        a.back href=(Route::CaseStudies.path()) { "← Back to work" }
        @match state.outcome() {
            Outcome::Ready(Some(case)) => { (case_article(ctx, case, viewport)) },
            Outcome::Empty | Outcome::Ready(None) => {
                section.state.state-empty {
                    h1 { "Case study not found" }
                    p { "There is no published case study at this address." }
                }
            },
            _ => { (section_state(&state, "case study", |_| html! {})) },
        }
    };
    (title, body)
}

fn case_article(ctx: &Ctx, case: &CaseStudy, viewport: Viewport) -> Markup {
    let images: Vec<LightboxImage> = case
        .gallery_urls
        .iter()
        .enumerate()
        .map(|(i, url)| LightboxImage::new(url, format!("{} image {}", case.title, i + 1)))
        .collect();
    let gallery = BentoGallery::new(images, &ctx.layout, viewport);
    html! {
        article.case-detail {
            header {
                h1 { (case.title) }
                p.case-meta {
                    @if let Some(year) = case.year { span.year { (year) } }
                    @if !case.role.is_empty() { span.role { (case.role) } }
                }
                (tags(&case.tools))
            }
            @if let Some(hero) = &case.hero_image_url {
                img.hero-image src=(hero) alt=(case.title);
            }
            @if !case.blurb.is_empty() { div.blurb { (markdown(&case.blurb)) } }
            @if !case.problem.is_empty() {
                section.problem { h2 { "Problem" } (markdown(&case.problem)) }
            }
            @if !case.approach.is_empty() {
                section.approach {
                    h2 { "Approach" }
                    ol { @for step in &case.approach { li { (step) } } }
                }
            }
            @if !case.outcome.is_empty() {
                section.outcome { h2 { "Outcome" } (markdown(&case.outcome)) }
            }
            @if !case.process_steps.is_empty() {
                section.process-steps {
                    h2 { "Process" }
                    ol { @for step in &case.process_steps { li { (step) } } }
                }
            }
            @if !gallery.tiles().is_empty() {
                section.gallery {
                    h2 { "Gallery" }
                    (render_bento(&gallery, &[]))
                }
            }
        }
    }
}

fn render_experiments(state: &FetchState<Vec<Experiment>>) -> Markup {
    html! {
        section.page-header {
            h1 { "IA Experiments" }
            p { "Information architecture tests, card sorts, and navigation studies." }
        }
        (section_state(state, "experiments", |experiments| html! {
            div.card-grid {
                @for exp in experiments {
                    article.card {
                        h3 { (exp.title) }
                        p { (exp.summary) }
                        @if let Some(link) = &exp.external_link {
                            a href=(link) target="_blank" rel="noopener" { "View experiment →" }
                        }
                    }
                }
            }
        }))
    }
}

fn render_processes(
    state: &FetchState<Vec<ProcessArticle>>,
    category: ProcessCategory,
    ids: &mut RegionIds,
) -> Markup {
    let (heading, intro) = match category {
        ProcessCategory::DesignOps => (
            "Design Process",
            "How design systems and operations are run day to day.",
        ),
        ProcessCategory::Management => (
            "Product Management",
            "Planning, prioritisation, and the rituals around them.",
        ),
    };
    html! {
        section.page-header { h1 { (heading) } p { (intro) } }
        (section_state(state, "process articles", |articles| html! {
            div.expandable-list {
                @for article in articles {
                    @let card = Expandable::new(&article.title, ids);
                    (disclosure_block(
                        "expandable",
                        &card.disclosure(),
                        html! {
                            span.expandable-title { (article.title) }
                            span.expandable-description { (article.description) }
                        },
                        process_body(article),
                    ))
                }
            }
        }))
    }
}

fn process_body(article: &ProcessArticle) -> Markup {
    html! {
        @if !article.overview.is_empty() {
            div.overview { (markdown(&article.overview)) }
        }
        @if !article.steps.is_empty() {
            h4 { "Steps" }
            ol { @for step in &article.steps { li { (step) } } }
        }
        @if !article.artifacts_links.is_empty() {
            h4 { "Artifacts" }
            ul {
                @for link in &article.artifacts_links {
                    li { a href=(link) target="_blank" rel="noopener" { (link) } }
                }
            }
        }
        @if let Some(pdf) = &article.pdf_url {
            a.pdf href=(pdf) { "Download PDF" }
        }
    }
}

fn render_research(state: &FetchState<Vec<ResearchCase>>, ids: &mut RegionIds) -> Markup {
    html! {
        section.page-header {
            h1 { "UX Research" }
            p { "Studies, methods, and the insight each one produced." }
        }
        (section_state(state, "research cases", |cases| {
            let accordion = Accordion::new(cases.iter().map(|c| c.title.as_str()), ids);
            html! {
                div.accordion {
                    @for (i, case) in cases.iter().enumerate() {
                        @if let Some(disclosure) = accordion.disclosure(i) {
                            (disclosure_block(
                                "accordion-item",
                                &disclosure,
                                html! { span { (case.title) } },
                                research_body(case),
                            ))
                        }
                    }
                }
            }
        }))
    }
}

fn research_body(case: &ResearchCase) -> Markup {
    html! {
        dl {
            dt { "Context" } dd { (case.context) }
            dt { "Method" } dd { (case.method) }
            dt { "Key insight" } dd { (case.key_insight) }
        }
        @if let Some(notes) = &case.notes_link {
            a href=(notes) target="_blank" rel="noopener" { "Read the notes →" }
        }
    }
}

fn render_gallery(ctx: &Ctx, viewport: Viewport) -> Markup {
    html! {
        section.page-header {
            h1 { "Portfolio Gallery" }
            p { "A selection of design work, prototypes, and creative explorations. Click any image to view it full screen." }
        }
        (section_state(&ctx.content.gallery, "gallery items", |items: &Vec<GalleryItem>| {
            let images = items
                .iter()
                .map(|item| LightboxImage::new(&item.image_url, &item.alt_text))
                .collect();
            let captions: Vec<&str> = items.iter().map(|item| item.caption.as_str()).collect();
            let gallery = BentoGallery::new(images, &ctx.layout, viewport);
            render_bento(&gallery, &captions)
        }))
    }
}

fn render_not_found() -> Markup {
    html! {
        section.not-found {
            h1 { "404" }
            p { "This page doesn't exist." }
            a.button href="/" { "Back home" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::query::Collection;
    use crate::site::fetch_site;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    async fn content_from(source: StaticSource) -> SiteContent {
        fetch_site(&source, &SiteConfig::default()).await
    }

    fn full_source() -> StaticSource {
        StaticSource::new()
            .with_rows(Collection::PortfolioMetadata, vec![metadata_row()])
            .with_rows(
                Collection::CaseStudies,
                vec![case_study_row("skyreal", 1, true), case_study_row("atlas", 2, true)],
            )
            .with_rows(Collection::Experiments, vec![experiment_row("e1", 1, true)])
            .with_rows(
                Collection::ProcessArticles,
                vec![
                    process_row("d1", "Design Ops", 1),
                    process_row("d2", "Design Ops", 2),
                    process_row("m1", "Management", 1),
                ],
            )
            .with_rows(
                Collection::ResearchCases,
                vec![research_row("r1", 1), research_row("r2", 2)],
            )
            .with_rows(
                Collection::GalleryItems,
                vec![
                    gallery_row("g1", "Brand/Web", 1),
                    gallery_row("g2", "Brand/Web", 2),
                    gallery_row("g3", "Brand/Web", 3),
                ],
            )
    }

    fn page(route: Route, content: &SiteContent) -> String {
        render_page(&route, content, &SiteConfig::default())
            .unwrap()
            .into_string()
    }

    #[tokio::test]
    async fn home_uses_metadata_title() {
        let content = content_from(full_source()).await;
        let html = page(Route::Home, &content);
        assert!(html.contains("<title>Ana Ribeiro</title>"));
        assert!(html.contains("Product designer"));
        assert!(html.contains(r#"href="/cv.pdf""#));
        assert!(html.contains("Lisbon, Portugal"));
    }

    #[tokio::test]
    async fn home_falls_back_to_config_title() {
        let content = content_from(full_source().failing(Collection::PortfolioMetadata, "down")).await;
        let html = page(Route::Home, &content);
        assert!(html.contains("<title>Portfolio</title>"));
        assert!(html.contains(r#"class="state state-error""#));
        // other sections still render
        assert!(html.contains("Case skyreal"));
    }

    #[tokio::test]
    async fn home_menu_links_every_section() {
        let content = content_from(full_source()).await;
        let html = page(Route::Home, &content);
        for route in &Route::NAV {
            assert!(html.contains(&format!(r#"href="{}""#, route.path())));
        }
        assert!(html.contains("grid-column: span 2; grid-row: span 2;"));
    }

    #[tokio::test]
    async fn error_and_empty_states_differ() {
        let failing = content_from(full_source().failing(Collection::Experiments, "network timeout")).await;
        let html = page(Route::Experiments, &failing);
        assert!(html.contains(r#"class="state state-error""#));
        assert!(html.contains("network timeout"));
        assert!(!html.contains(r#"class="state state-empty""#));

        let empty = content_from(full_source().with_rows(Collection::Experiments, Vec::new())).await;
        let html = page(Route::Experiments, &empty);
        assert!(html.contains(r#"class="state state-empty""#));
        assert!(html.contains("No experiments yet"));
        assert!(!html.contains(r#"class="state state-error""#));
    }

    #[tokio::test]
    async fn research_accordion_has_aria_contract() {
        let content = content_from(full_source()).await;
        let html = page(Route::Research, &content);
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains(r#"aria-controls="content-study-r1""#));
        assert!(html.contains(r#"id="content-study-r1""#));
        assert!(html.contains(r#"aria-controls="content-study-r2""#));
    }

    #[tokio::test]
    async fn process_pages_split_by_category() {
        let content = content_from(full_source()).await;
        let ops = page(Route::Process(ProcessCategory::DesignOps), &content);
        assert!(ops.contains("Process d1"));
        assert!(ops.contains("Process d2"));
        assert!(!ops.contains("Process m1"));
        assert!(ops.contains("<em>overview</em>"));
        let mgmt = page(Route::Process(ProcessCategory::Management), &content);
        assert!(mgmt.contains("Process m1"));
        assert!(mgmt.contains(r#"class="expandable""#));
    }

    #[tokio::test]
    async fn gallery_tiles_carry_spans_and_indices() {
        let content = content_from(full_source()).await;
        let html = page(Route::Gallery, &content);
        assert!(html.contains(r#"data-index="0""#));
        assert!(html.contains(r#"data-index="2""#));
        assert!(html.contains("Caption g2"));
        assert!(html.contains(r#"class="lightbox""#));
        assert!(html.contains(r#"data-count="3" hidden"#));
    }

    #[tokio::test]
    async fn case_detail_renders_narrative_and_gallery() {
        let content = content_from(full_source()).await;
        let html = page(
            Route::CaseStudy {
                slug: "skyreal".into(),
            },
            &content,
        );
        assert!(html.contains("<title>Case skyreal · Ana Ribeiro</title>"));
        assert!(html.contains("<strong>problem</strong>"));
        assert!(html.contains("Interview users"));
        assert!(html.contains("/img/skyreal/2.jpg"));
        assert!(html.contains("Figma"));
    }

    #[tokio::test]
    async fn unknown_slug_renders_not_found_block() {
        let content = content_from(full_source()).await;
        let html = page(
            Route::CaseStudy {
                slug: "missing".into(),
            },
            &content,
        );
        assert!(html.contains("Case study not found"));
    }

    #[test]
    fn lightbox_markup_follows_open_state() {
        let viewport = Viewport::new();
        let mut lightbox = Lightbox::new(
            vec![
                LightboxImage::new("/a.jpg", "a"),
                LightboxImage::new("/b.jpg", "b"),
            ],
            viewport,
        );
        let closed = render_lightbox(&lightbox).into_string();
        assert!(closed.contains("hidden"));
        assert!(closed.contains("/a.jpg"));
        lightbox.open(1);
        let open = render_lightbox(&lightbox).into_string();
        assert!(!open.contains("hidden"));
        assert!(open.contains("/b.jpg"));
    }

    #[test]
    fn empty_lightbox_renders_nothing() {
        let lightbox = Lightbox::new(Vec::new(), Viewport::new());
        assert_eq!(render_lightbox(&lightbox).into_string(), "");
    }

    #[test]
    fn section_prefers_error_over_data() {
        let state: FetchState<Vec<u8>> = FetchState::failed(FetchError::new("boom"));
        let html = section_state(&state, "things", |_| html! { "data" }).into_string();
        assert!(html.contains("boom"));
        assert!(!html.contains("data"));
    }

    #[tokio::test]
    async fn generate_writes_every_route() {
        let content = content_from(full_source()).await;
        let tmp = TempDir::new().unwrap();
        let pages = generate(&content, &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(pages.len(), site_routes(&content).len());
        for file in [
            "index.html",
            "work/index.html",
            "work/skyreal/index.html",
            "work/atlas/index.html",
            "experiments/index.html",
            "process/index.html",
            "management/index.html",
            "research/index.html",
            "gallery/index.html",
            "404.html",
        ] {
            assert!(tmp.path().join(file).exists(), "missing {file}");
        }
    }

    #[tokio::test]
    async fn generate_with_all_sections_failing_still_writes_pages() {
        let content = content_from(StaticSource::new()
            .failing(Collection::PortfolioMetadata, "down")
            .failing(Collection::CaseStudies, "down")
            .failing(Collection::Experiments, "down")
            .failing(Collection::ProcessArticles, "down")
            .failing(Collection::ResearchCases, "down")
            .failing(Collection::GalleryItems, "down"))
        .await;
        let tmp = TempDir::new().unwrap();
        let pages = generate(&content, &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(pages.len(), 1 + Route::NAV.len() + 1);
        let work = fs::read_to_string(tmp.path().join("work/index.html")).unwrap();
        assert!(work.contains(r#"class="state state-error""#));
    }

    #[tokio::test]
    async fn slug_with_dot_segments_stays_inside_output_dir() {
        let source = StaticSource::new().with_rows(
            Collection::CaseStudies,
            vec![case_study_row("../../escaped", 1, true)],
        );
        let content = content_from(source).await;
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("site/dist");
        let pages = generate(&content, &SiteConfig::default(), &dist).unwrap();

        assert_eq!(pages.len(), 1 + Route::NAV.len() + 1);
        assert!(!pages.iter().any(|p| matches!(p.route, Route::CaseStudy { .. })));
        assert!(!tmp.path().join("site/escaped").exists());
        assert!(!tmp.path().join("escaped").exists());
    }

    #[tokio::test]
    async fn empty_slug_does_not_replace_work_index() {
        let source = StaticSource::new().with_rows(
            Collection::CaseStudies,
            vec![case_study_row("", 1, true), case_study_row("atlas", 2, true)],
        );
        let content = content_from(source).await;
        let tmp = TempDir::new().unwrap();
        let pages = generate(&content, &SiteConfig::default(), tmp.path()).unwrap();

        assert_eq!(pages.len(), 1 + Route::NAV.len() + 1 + 1);
        let work = fs::read_to_string(tmp.path().join("work/index.html")).unwrap();
        assert!(!work.contains("Loading case study"));
        assert!(work.contains("Case atlas"));
        assert!(tmp.path().join("work/atlas/index.html").exists());
    }
}
