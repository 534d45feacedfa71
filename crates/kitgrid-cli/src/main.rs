use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kitgrid_core::api::{Decision, ListFilter};
use kitgrid_core::record::RecordId;

mod commands;

#[derive(Parser)]
#[command(name = "kitgrid")]
#[command(about = "KITGRID - review and batch-approve uniform requests", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/kitgrid/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON dataset file; when omitted, api.base_url is used
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Only records of this project
    #[arg(long)]
    project: Option<String>,
    /// Only records with this StoreRequestStatus
    #[arg(long)]
    status: Option<String>,
    /// Earliest request date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest request date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl From<FilterArgs> for ListFilter {
    fn from(args: FilterArgs) -> Self {
        ListFilter {
            date_from: args.from,
            date_to: args.to,
            project: args.project,
            status: args.status,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of the grid
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Client-side text filter
        #[arg(long)]
        search: Option<String>,
        /// Sort column, optionally suffixed with :asc or :desc
        #[arg(long)]
        sort: Option<String>,
    },
    /// Print a single record
    Show { id: RecordId },
    /// Submit one approve/reject decision for a set of records
    Decide {
        /// approve or reject
        decision: Decision,
        #[command(flatten)]
        filter: FilterArgs,
        /// Record ids to select
        #[arg(long, value_delimiter = ',', required_unless_present = "page")]
        ids: Vec<RecordId>,
        /// Select every eligible record on this page
        #[arg(long, conflicts_with = "ids")]
        page: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = commands::Context::build(cli.config, cli.data)?;

    match cli.command {
        Commands::List {
            filter,
            page,
            search,
            sort,
        } => commands::list::run(&ctx, filter.into(), page, search, sort).await?,
        Commands::Show { id } => commands::show::run(&ctx, id).await?,
        Commands::Decide {
            decision,
            filter,
            ids,
            page,
        } => commands::decide::run(&ctx, decision, filter.into(), ids, page).await?,
    }

    Ok(())
}
