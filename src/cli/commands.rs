use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vulnscope",
    version,
    about = "Terminal browser for CVE fix-analysis benchmark datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List browsable CVE entries
    List(ListArgs),
    /// Search entries by free text
    Search(SearchArgs),
    /// Show one CVE: description, fixing commits, fixed methods, diffs
    Show(ShowArgs),
    /// Crawl a database's output tree for runs with analysis results
    Discover(DiscoverArgs),
    /// Inspect one run's SARIF results, labeled against ground truth
    Inspect(InspectArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Restrict to one CWE category (e.g. 22, 78, 79, 94)
    #[arg(long)]
    pub cwe: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Free-text query; every term must match some field
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    /// CVE identifier, e.g. CVE-2016-9177
    pub cve_id: String,

    /// Skip the NVD lookup
    #[arg(long)]
    pub no_nvd: bool,

    /// Skip fetching commit diffs from the forge
    #[arg(long)]
    pub no_diffs: bool,
}

#[derive(Args, Clone)]
pub struct DiscoverArgs {
    /// Database name under the output directory
    pub db_name: String,

    /// Fail on probe errors instead of treating them as empty directories
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct InspectArgs {
    /// Database name under the output directory
    pub db_name: String,

    /// Run identifier
    pub run_id: String,

    /// Query name, e.g. cwe-022wLLM
    pub query: String,

    /// Label code-flow steps against this CVE's fixed methods
    #[arg(long)]
    pub cve: Option<String>,

    /// Maximum steps to print per code flow
    #[arg(long, default_value = "30")]
    pub max_steps: usize,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
