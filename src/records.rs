//! Typed record shapes for each content collection.
//!
//! Rows arrive as loosely-typed JSON from the data source and are decoded into
//! these structs only after [`Query::apply`](crate::query::Query::apply) has
//! filtered and ordered them. List fields and optional links default when the
//! backend omits them; identity and title fields are required.

use crate::query::Collection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A record type bound to exactly one collection.
pub trait Record: DeserializeOwned + Serialize + Clone {
    const COLLECTION: Collection;

    /// Short human label used in CLI output.
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub approach: Vec<String>,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub gallery_urls: Vec<String>,
    #[serde(default)]
    pub process_steps: Vec<String>,
    pub order_index: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl Record for CaseStudy {
    const COLLECTION: Collection = Collection::CaseStudies;

    fn label(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub external_link: Option<String>,
    pub order_index: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl Record for Experiment {
    const COLLECTION: Collection = Collection::Experiments;

    fn label(&self) -> &str {
        &self.title
    }
}

/// Process article category. Used as a query filter, not a subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessCategory {
    #[serde(rename = "Design Ops")]
    DesignOps,
    #[serde(rename = "Management")]
    Management,
}

impl ProcessCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessCategory::DesignOps => "Design Ops",
            ProcessCategory::Management => "Management",
        }
    }
}

impl fmt::Display for ProcessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "design ops" => Ok(ProcessCategory::DesignOps),
            "management" => Ok(ProcessCategory::Management),
            _ => Err(format!(
                "unknown category '{s}' (expected 'Design Ops' or 'Management')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessArticle {
    pub id: String,
    pub category: ProcessCategory,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub artifacts_links: Vec<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    pub order_index: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl Record for ProcessArticle {
    const COLLECTION: Collection = Collection::ProcessArticles;

    fn label(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchCase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub key_insight: String,
    #[serde(default)]
    pub notes_link: Option<String>,
    pub order_index: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl Record for ResearchCase {
    const COLLECTION: Collection = Collection::ResearchCases;

    fn label(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub section: String,
    pub order_index: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl Record for GalleryItem {
    const COLLECTION: Collection = Collection::GalleryItems;

    fn label(&self) -> &str {
        if self.caption.is_empty() {
            &self.image_url
        } else {
            &self.caption
        }
    }
}

/// Site-wide metadata. One row expected; the lowest `order_index` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetadata {
    pub id: String,
    pub site_title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

impl Record for PortfolioMetadata {
    const COLLECTION: Collection = Collection::PortfolioMetadata;

    fn label(&self) -> &str {
        &self.site_title
    }
}
