use clap::Parser;
use replay_page::ReplayPlan;
use replay_page::config::PageSetConfig;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON page set configuration file
    #[arg(short, long)]
    config: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from file
    let config_path = PathBuf::from(&args.config);
    let config = PageSetConfig::from_file(config_path)?;

    println!("Loaded page set configuration:");
    println!("  Name: {}", config.name);
    println!("  User agent type: {}", config.user_agent_type);
    println!("  Archive data file: {}", config.archive_data_file);
    println!("  Default wait: {}s", config.wait_seconds);
    println!("  Number of pages: {}", config.pages.len());

    // Convert into a validated page set
    let set = config.into_page_set()?;
    println!("Page set '{}' validated.", set.name);

    // Emit the plan the harness would replay
    let plan = ReplayPlan::for_set(&set);
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
