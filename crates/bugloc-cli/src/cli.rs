use std::path::PathBuf;

use bugloc_core::config::CliOverrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bugloc",
    version,
    about = "Fuse per-candidate relevance signals into one ranking score per bug"
)]
pub struct Cli {
    /// Project root holding bugloc.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// SQLite database path (overrides config and BUGLOC_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize, combine and persist scores for every bug of a product
    Fuse(FuseArgs),

    /// Show the top-ranked candidates of one bug
    Top {
        /// Bug id
        bug_id: String,

        /// Number of candidates to show
        #[arg(short = 'k', long, default_value_t = bugloc_core::constants::DEFAULT_TOP_K)]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct FuseArgs {
    /// Product whose bugs are fused
    #[arg(short, long)]
    pub product: Option<String>,

    /// Text-vs-history blend weight in [0, 1]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Commit-log weight in [0, 1]
    #[arg(long)]
    pub beta: Option<f64>,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Process bugs oldest fix first
    #[arg(long)]
    pub by_fixed_date: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Config overrides carried by the command line.
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            db_path: self.db.clone(),
            ..Default::default()
        };
        if let Command::Fuse(args) = &self.command {
            overrides.product_name = args.product.clone();
            overrides.alpha = args.alpha;
            overrides.beta = args.beta;
            overrides.concurrency = args.concurrency;
            overrides.order_by_fixed_date = args.by_fixed_date.then_some(true);
        }
        overrides
    }
}
