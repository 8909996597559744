use clap::{Parser, ValueEnum};
use replay_page::filter::{PageFilter, PageFilterConfig};

#[derive(Parser, Debug)]
#[command(name = "replay-page")]
#[command(about = "Page set fixtures for a recorded page replay harness")]
#[command(version)]
pub struct Args {
    /// Built-in set name, or a path to a JSON page set file with --config-file
    pub set: Option<String>,

    /// Treat SET as a path to a JSON page set configuration file
    #[arg(short, long, default_value_t = false)]
    pub config_file: bool,

    /// What to do with the selected set
    #[arg(short, long, value_enum, default_value_t = Mode::Plan)]
    pub mode: Mode,

    /// Only plan pages on this domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Regex patterns for page URLs to include
    #[arg(long)]
    pub include: Vec<String>,

    /// Regex patterns for page URLs to exclude
    #[arg(long)]
    pub exclude: Vec<String>,

    /// List the built-in page sets and exit
    #[arg(short, long, default_value_t = false)]
    pub list: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Print the replay plan as text
    Plan,
    /// Validate the set and report
    Validate,
    /// Emit the replay plan as JSON
    Export,
}

/// Build the page filter from the command-line filter flags
pub fn build_filter(args: &Args) -> Result<PageFilter, regex::Error> {
    PageFilter::new(PageFilterConfig {
        required_domain: args.domain.clone(),
        include_patterns: args.include.clone(),
        exclude_patterns: args.exclude.clone(),
    })
}
