use clap::{Parser, Subcommand};
use folio::fetch::{FetchState, Loader, fetch_once};
use folio::hooks::{
    CaseStudies, CaseStudyBySlug, Experiments, Gallery, Metadata, Processes, Research,
};
use folio::query::{Collection, Query};
use folio::records::ProcessCategory;
use folio::source::{DataSource, connect, snapshot};
use folio::{config, generate, output, site};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static portfolio site builder backed by a hosted content database")]
#[command(long_about = "\
Static portfolio site builder backed by a hosted content database

Content lives in six collections (tables) behind a PostgREST endpoint:

  case_studies         → /work/ and /work/{slug}/
  ia_experiments       → /experiments/
  product_processes    → /process/ (Design Ops) and /management/
  ux_research_cases    → /research/
  gallery_items        → /gallery/ (one configured section)
  portfolio_metadata   → site title, tagline, contact details

Only rows with is_active = true are published, ordered by order_index.
A section whose query fails renders an inline error; the rest of the site
still builds.

Sources:
  live       query the hosted database (needs url + anon key)
  snapshot   read a JSON dump written by 'folio snapshot'

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "folio.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all content and produce the HTML site
    Build,
    /// Fetch all content and report each section without writing the site
    Check,
    /// Print the published rows of one collection as JSON
    Fetch {
        /// Collection name (case-studies, experiments, processes, research, gallery, metadata)
        collection: Collection,
        /// Look up a single case study by slug
        #[arg(long)]
        slug: Option<String>,
        /// Process category ("Design Ops" or "Management")
        #[arg(long)]
        category: Option<ProcessCategory>,
        /// Gallery section (defaults to the configured one)
        #[arg(long)]
        section: Option<String>,
    },
    /// Dump every collection from the configured source to a JSON snapshot
    Snapshot {
        /// Snapshot file to write
        #[arg(long, default_value = "content.json")]
        out: PathBuf,
    },
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (site_config, source) = open_source(&cli.config)?;
            let content = site::fetch_site(source.as_ref(), &site_config).await;
            let pages = generate::generate(&content, &site_config, &cli.output)?;
            output::print_generate_output(&pages);
            output::print_failures(&content);
        }
        Command::Check => {
            let (site_config, source) = open_source(&cli.config)?;
            let content = site::fetch_site(source.as_ref(), &site_config).await;
            output::print_check_output(&content);
        }
        Command::Fetch {
            collection,
            slug,
            category,
            section,
        } => {
            let (site_config, source) = open_source(&cli.config)?;
            let source = source.as_ref();
            match collection {
                Collection::CaseStudies => match slug {
                    Some(slug) => print_rows::<CaseStudyBySlug>(source, Some(slug)).await?,
                    None => print_rows::<CaseStudies>(source, ()).await?,
                },
                Collection::Experiments => print_rows::<Experiments>(source, ()).await?,
                Collection::ProcessArticles => match category {
                    Some(category) => print_rows::<Processes>(source, category).await?,
                    None => print_raw(source, Query::active(collection)).await?,
                },
                Collection::ResearchCases => print_rows::<Research>(source, ()).await?,
                Collection::GalleryItems => {
                    let section = section.unwrap_or_else(|| site_config.gallery.section.clone());
                    print_rows::<Gallery>(source, section).await?
                }
                Collection::PortfolioMetadata => print_rows::<Metadata>(source, ()).await?,
            }
        }
        Command::Snapshot { out } => {
            let (_, source) = open_source(&cli.config)?;
            let captured = snapshot::capture(source.as_ref()).await?;
            captured.save(&out)?;
            output::print_snapshot_output(&captured, &out);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config and connect to the source it names.
fn open_source(
    config_path: &Path,
) -> Result<(config::SiteConfig, Box<dyn DataSource>), Box<dyn std::error::Error>> {
    let site_config = config::load_config(config_path)?;
    let source = connect(&site_config.source, config_dir(config_path))?;
    Ok((site_config, source))
}

/// Directory relative snapshot paths resolve against.
fn config_dir(config_path: &Path) -> &Path {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

async fn print_rows<L: Loader>(
    source: &dyn DataSource,
    param: L::Param,
) -> Result<(), Box<dyn std::error::Error>>
where
    L::Output: Serialize,
{
    let state: FetchState<L::Output> = fetch_once::<L>(source, param).await;
    if let Some(err) = state.error {
        return Err(err.into());
    }
    println!("{}", serde_json::to_string_pretty(&state.data)?);
    Ok(())
}

async fn print_raw(source: &dyn DataSource, query: Query) -> Result<(), Box<dyn std::error::Error>> {
    let rows = query.apply(source.select(&query).await?);
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
