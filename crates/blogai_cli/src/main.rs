use anyhow::Result;
use blogai_publish::wordpress::DEFAULT_PREVIEW_LIMIT;
use blogai_publish::{Credentials, PostStatus};
use blogai_source::DEFAULT_SOURCE_URL;
use blogai_web::DEFAULT_ADDR;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

mod commands;
mod logging;

use commands::parse_selection;

pub const DEFAULT_PREFS_PATH: &str = "blogai-preferences.json";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Article source: static (bundled sample data) or http
    #[arg(long, env = "BLOGAI_SOURCE", default_value = "static")]
    source: String,
    /// Base URL of the article service, used by the http source
    #[arg(long, env = "BLOGAI_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    source_url: String,
    /// UI preferences file
    #[arg(long, env = "BLOGAI_PREFS", default_value = DEFAULT_PREFS_PATH)]
    prefs: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the article API, blog pages and the dashboard
    Serve {
        #[arg(long, env = "BLOGAI_ADDR", default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
    },
    /// List the domains of the loaded articles
    Domains,
    /// List articles passing the given filters
    List {
        /// Only articles whose link is on this domain ("all" for every article)
        #[arg(long)]
        domain: Option<String>,
        /// Filter selection as category=value, e.g. keywords=AI
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
    },
    /// Show the filter groups offered for a selection
    Filters {
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,
    },
    /// Render one article, by id or index, as HTML
    Render {
        key: String,
        /// Show only the first N entries of each list
        #[arg(long)]
        preview: Option<usize>,
        /// Render the compact card instead of the full page
        #[arg(long)]
        card: bool,
    },
    /// Post one article, by id or index, to WordPress
    Publish {
        key: String,
        #[arg(long, env = "BLOGAI_WP_URL")]
        url: String,
        #[arg(long, env = "BLOGAI_WP_USERNAME")]
        username: String,
        #[arg(long, env = "BLOGAI_WP_PASSWORD", hide_env_values = true)]
        password: String,
        /// draft or publish
        #[arg(long, default_value = "publish")]
        status: PostStatus,
        #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
        preview: usize,
    },
    /// Show or flip the sidebar preference
    Sidebar {
        #[arg(long)]
        toggle: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    if let Commands::Sidebar { toggle } = cli.command {
        return commands::sidebar(&cli.prefs, toggle);
    }
    if let Commands::Filters { selections } = &cli.command {
        return commands::filters(selections);
    }

    let source = blogai_source::create_source(&cli.source, Some(&cli.source_url))?;

    match cli.command {
        Commands::Serve { addr } => commands::serve(source, addr).await,
        Commands::Domains => commands::domains(source.as_ref()).await,
        Commands::List { domain, selections } => {
            commands::list(source.as_ref(), domain.as_deref(), &selections).await
        }
        Commands::Render { key, preview, card } => {
            commands::render(source.as_ref(), &key, preview, card).await
        }
        Commands::Publish {
            key,
            url,
            username,
            password,
            status,
            preview,
        } => {
            let credentials = Credentials::new(url, username, password);
            commands::publish(source.as_ref(), &key, credentials, status, preview).await
        }
        Commands::Sidebar { .. } | Commands::Filters { .. } => Ok(()),
    }
}
