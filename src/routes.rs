//! Route table for the generated site.
//!
//! Every collection has one list route; case studies also have a
//! detail-by-slug route. A route carries exactly the parameter its page's
//! resource needs.
//!
//! ```text
//! /                   Home          metadata + case studies
//! /work/              CaseStudies   case studies
//! /work/{slug}/       CaseStudy     case study by slug
//! /experiments/       Experiments   experiments
//! /process/           Process       process articles (Design Ops)
//! /management/        Process       process articles (Management)
//! /research/          Research      research cases
//! /gallery/           Gallery       gallery items (configured section)
//! /404.html           NotFound
//! ```

use crate::records::ProcessCategory;
use std::path::PathBuf;

/// Whether `slug` can name a detail page: one non-empty path segment that
/// cannot climb out of the output directory.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CaseStudies,
    CaseStudy { slug: String },
    Experiments,
    Process(ProcessCategory),
    Research,
    Gallery,
    NotFound,
}

impl Route {
    /// List routes shown in navigation, in menu order.
    pub const NAV: [Route; 6] = [
        Route::CaseStudies,
        Route::Experiments,
        Route::Process(ProcessCategory::DesignOps),
        Route::Process(ProcessCategory::Management),
        Route::Research,
        Route::Gallery,
    ];

    /// Resolve a URL path. Unknown paths map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["index.html"] => Route::Home,
            ["work"] => Route::CaseStudies,
            ["work", slug] if is_safe_slug(slug) => Route::CaseStudy {
                slug: slug.to_string(),
            },
            ["experiments"] => Route::Experiments,
            ["process"] => Route::Process(ProcessCategory::DesignOps),
            ["management"] => Route::Process(ProcessCategory::Management),
            ["research"] => Route::Research,
            ["gallery"] => Route::Gallery,
            _ => Route::NotFound,
        }
    }

    /// Canonical URL path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CaseStudies => "/work/".to_string(),
            Route::CaseStudy { slug } => format!("/work/{slug}/"),
            Route::Experiments => "/experiments/".to_string(),
            Route::Process(ProcessCategory::DesignOps) => "/process/".to_string(),
            Route::Process(ProcessCategory::Management) => "/management/".to_string(),
            Route::Research => "/research/".to_string(),
            Route::Gallery => "/gallery/".to_string(),
            Route::NotFound => "/404.html".to_string(),
        }
    }

    /// File the page is written to, relative to the output directory.
    pub fn output_file(&self) -> PathBuf {
        match self {
            Route::NotFound => PathBuf::from("404.html"),
            other => {
                let dir = other.path();
                PathBuf::from(dir.trim_start_matches('/')).join("index.html")
            }
        }
    }

    /// Navigation label.
    pub fn title(&self) -> &str {
        match self {
            Route::Home => "Home",
            Route::CaseStudies => "Work",
            Route::CaseStudy { slug } => slug,
            Route::Experiments => "IA Experiments",
            Route::Process(ProcessCategory::DesignOps) => "Design Process",
            Route::Process(ProcessCategory::Management) => "Product Management",
            Route::Research => "UX Research",
            Route::Gallery => "Gallery",
            Route::NotFound => "Not Found",
        }
    }

    /// One-line description used on the home page menu.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Route::CaseStudies => "Selected case studies",
            Route::Experiments => "Information architecture experiments",
            Route::Process(ProcessCategory::DesignOps) => "Design systems & operations",
            Route::Process(ProcessCategory::Management) => "Strategic thinking & planning",
            Route::Research => "User insights & discoveries",
            Route::Gallery => "Visual identity & branding",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/work/"), Route::CaseStudies);
        assert_eq!(Route::parse("/work"), Route::CaseStudies);
        assert_eq!(
            Route::parse("/management/"),
            Route::Process(ProcessCategory::Management)
        );
        assert_eq!(
            Route::parse("/process"),
            Route::Process(ProcessCategory::DesignOps)
        );
    }

    #[test]
    fn parse_detail_route_extracts_slug() {
        assert_eq!(
            Route::parse("/work/skyreal-vr/?ref=home"),
            Route::CaseStudy {
                slug: "skyreal-vr".into()
            }
        );
    }

    #[test]
    fn parse_unknown_is_not_found() {
        assert_eq!(Route::parse("/work/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/blog/"), Route::NotFound);
    }

    #[test]
    fn parse_rejects_dot_segments() {
        assert_eq!(Route::parse("/work/../"), Route::NotFound);
        assert_eq!(Route::parse("/work/./"), Route::NotFound);
    }

    #[test]
    fn safe_slugs() {
        assert!(is_safe_slug("skyreal-vr"));
        assert!(is_safe_slug("v1.2"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug("."));
        assert!(!is_safe_slug(".."));
        assert!(!is_safe_slug("../../escaped"));
        assert!(!is_safe_slug("a/b"));
        assert!(!is_safe_slug("a\\b"));
        assert!(!is_safe_slug("line\nbreak"));
    }

    #[test]
    fn path_round_trips_through_parse() {
        let mut routes = Route::NAV.to_vec();
        routes.push(Route::Home);
        routes.push(Route::CaseStudy {
            slug: "skyreal".into(),
        });
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn output_files() {
        assert_eq!(Route::Home.output_file(), PathBuf::from("index.html"));
        assert_eq!(
            Route::CaseStudy {
                slug: "skyreal".into()
            }
            .output_file(),
            PathBuf::from("work/skyreal/index.html")
        );
        assert_eq!(Route::NotFound.output_file(), PathBuf::from("404.html"));
    }
}
