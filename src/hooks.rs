//! One typed loader per content query.
//!
//! | Loader | Parameter | Payload |
//! |--------|-----------|---------|
//! | [`CaseStudies`] | none | active case studies |
//! | [`CaseStudyBySlug`] | `Option<String>` slug | one case study |
//! | [`Experiments`] | none | active experiments |
//! | [`Processes`] | [`ProcessCategory`] | active articles in the category |
//! | [`Research`] | none | active research cases |
//! | [`Gallery`] | section name | active gallery items in the section |
//! | [`Metadata`] | none | site metadata row |
//!
//! Every list is filtered on `is_active = true` and ordered by `order_index`.
//! Pages hold a [`Resource`](crate::fetch::Resource) of one of these.

use crate::fetch::{FetchError, Loader, Resource, decode_list, decode_single};
use crate::query::{Collection, Query};
use crate::records::{
    CaseStudy, Experiment, GalleryItem, PortfolioMetadata, ProcessArticle, ProcessCategory,
    Record, ResearchCase,
};
use serde_json::Value;

pub struct CaseStudies;

impl Loader for CaseStudies {
    type Param = ();
    type Output = Vec<CaseStudy>;
    const LABEL: &'static str = "case studies";

    fn query(_: &()) -> Option<Query> {
        Some(Query::active(CaseStudy::COLLECTION))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        decode_list(rows)
    }
}

/// Detail-page lookup. No slug, no query.
pub struct CaseStudyBySlug;

impl Loader for CaseStudyBySlug {
    type Param = Option<String>;
    type Output = Option<CaseStudy>;
    const LABEL: &'static str = "case study";

    fn query(slug: &Option<String>) -> Option<Query> {
        let slug = slug.as_deref().filter(|s| !s.is_empty())?;
        Some(Query::active(CaseStudy::COLLECTION).eq("slug", slug))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        if rows.len() > 1 {
            return Err(FetchError::new(format!(
                "slug is not unique: {} rows matched",
                rows.len()
            )));
        }
        decode_single(rows)
    }
}

pub struct Experiments;

impl Loader for Experiments {
    type Param = ();
    type Output = Vec<Experiment>;
    const LABEL: &'static str = "experiments";

    fn query(_: &()) -> Option<Query> {
        Some(Query::active(Experiment::COLLECTION))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        decode_list(rows)
    }
}

pub struct Processes;

impl Loader for Processes {
    type Param = ProcessCategory;
    type Output = Vec<ProcessArticle>;
    const LABEL: &'static str = "process articles";

    fn query(category: &ProcessCategory) -> Option<Query> {
        Some(Query::active(ProcessArticle::COLLECTION).eq("category", category.as_str()))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        decode_list(rows)
    }
}

pub struct Research;

impl Loader for Research {
    type Param = ();
    type Output = Vec<ResearchCase>;
    const LABEL: &'static str = "research cases";

    fn query(_: &()) -> Option<Query> {
        Some(Query::active(ResearchCase::COLLECTION))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        decode_list(rows)
    }
}

pub struct Gallery;

impl Loader for Gallery {
    type Param = String;
    type Output = Vec<GalleryItem>;
    const LABEL: &'static str = "gallery";

    fn query(section: &String) -> Option<Query> {
        Some(Query::active(GalleryItem::COLLECTION).eq("section", section.as_str()))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        decode_list(rows)
    }
}

/// Site metadata. Only the first row by `order_index` is used.
pub struct Metadata;

impl Loader for Metadata {
    type Param = ();
    type Output = Option<PortfolioMetadata>;
    const LABEL: &'static str = "metadata";

    fn query(_: &()) -> Option<Query> {
        Some(Query::active(Collection::PortfolioMetadata).limit(1))
    }

    fn decode(rows: Vec<Value>) -> Result<Self::Output, FetchError> {
        decode_single(rows)
    }
}

pub type CaseStudiesResource = Resource<CaseStudies>;
pub type CaseStudyResource = Resource<CaseStudyBySlug>;
pub type ExperimentsResource = Resource<Experiments>;
pub type ProcessesResource = Resource<Processes>;
pub type ResearchResource = Resource<Research>;
pub type GalleryResource = Resource<Gallery>;
pub type MetadataResource = Resource<Metadata>;
