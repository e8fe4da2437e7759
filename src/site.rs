//! Fetches everything the site's pages need.
//!
//! Each page section owns its own [`Resource`](crate::fetch::Resource); all
//! list queries run concurrently on the current task, then one detail query
//! per case study slug. A failing query only affects its own section: the
//! rest of [`SiteContent`] is still filled in and every page still renders.

use crate::config::SiteConfig;
use crate::fetch::{FetchError, FetchState};
use crate::hooks::{
    CaseStudiesResource, CaseStudyResource, ExperimentsResource, GalleryResource,
    MetadataResource, ProcessesResource, ResearchResource,
};
use crate::records::{
    CaseStudy, Experiment, GalleryItem, PortfolioMetadata, ProcessArticle, ProcessCategory,
    ResearchCase,
};
use crate::source::DataSource;
use futures::future::join_all;
use tracing::info;

/// Detail page state for one slug.
#[derive(Debug, Clone)]
pub struct CaseDetail {
    pub slug: String,
    pub state: FetchState<Option<CaseStudy>>,
}

/// Final fetch state of every section on the site.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub metadata: FetchState<Option<PortfolioMetadata>>,
    pub case_studies: FetchState<Vec<CaseStudy>>,
    pub experiments: FetchState<Vec<Experiment>>,
    pub design_ops: FetchState<Vec<ProcessArticle>>,
    pub management: FetchState<Vec<ProcessArticle>>,
    pub research: FetchState<Vec<ResearchCase>>,
    pub gallery_section: String,
    pub gallery: FetchState<Vec<GalleryItem>>,
    pub details: Vec<CaseDetail>,
}

impl SiteContent {
    /// Sections whose fetch failed, labelled for display.
    pub fn failures(&self) -> Vec<(String, &FetchError)> {
        let mut out: Vec<(String, &FetchError)> = Vec::new();
        let sections: [(&str, Option<&FetchError>); 7] = [
            ("metadata", self.metadata.error.as_ref()),
            ("case studies", self.case_studies.error.as_ref()),
            ("experiments", self.experiments.error.as_ref()),
            ("design ops", self.design_ops.error.as_ref()),
            ("management", self.management.error.as_ref()),
            ("research", self.research.error.as_ref()),
            ("gallery", self.gallery.error.as_ref()),
        ];
        for (label, err) in sections {
            if let Some(err) = err {
                out.push((label.to_string(), err));
            }
        }
        for detail in &self.details {
            if let Some(err) = &detail.state.error {
                out.push((format!("case study {}", detail.slug), err));
            }
        }
        out
    }

    pub fn processes(&self, category: ProcessCategory) -> &FetchState<Vec<ProcessArticle>> {
        match category {
            ProcessCategory::DesignOps => &self.design_ops,
            ProcessCategory::Management => &self.management,
        }
    }

    pub fn detail(&self, slug: &str) -> Option<&CaseDetail> {
        self.details.iter().find(|d| d.slug == slug)
    }
}

/// Fetch every section of the site from `source`.
pub async fn fetch_site(source: &dyn DataSource, config: &SiteConfig) -> SiteContent {
    let metadata = MetadataResource::new();
    let case_studies = CaseStudiesResource::new();
    let experiments = ExperimentsResource::new();
    let design_ops = ProcessesResource::new();
    let management = ProcessesResource::new();
    let research = ResearchResource::new();
    let gallery = GalleryResource::new();

    info!(source = %source.describe(), "fetching site content");
    tokio::join!(
        metadata.observe(source, ()),
        case_studies.observe(source, ()),
        experiments.observe(source, ()),
        design_ops.observe(source, ProcessCategory::DesignOps),
        management.observe(source, ProcessCategory::Management),
        research.observe(source, ()),
        gallery.observe(source, config.gallery.section.clone()),
    );

    let case_studies = case_studies.state();
    let slugs: Vec<String> = case_studies.data.iter().map(|c| c.slug.clone()).collect();
    let details = join_all(slugs.into_iter().map(|slug| async move {
        let resource = CaseStudyResource::new();
        resource.observe(source, Some(slug.clone())).await;
        CaseDetail {
            slug,
            state: resource.state(),
        }
    }))
    .await;

    SiteContent {
        metadata: metadata.state(),
        case_studies,
        experiments: experiments.state(),
        design_ops: design_ops.state(),
        management: management.state(),
        research: research.state(),
        gallery_section: config.gallery.section.clone(),
        gallery: gallery.state(),
        details,
    }
}
