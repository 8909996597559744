use clap::Parser;
use replay_page::replay::{self, DryRunRunner};
use replay_page::{ReplayPlan, sets};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Built-in set to plan and dry-run
    #[arg(short, long, default_value = "blogger_desktop")]
    set: String,

    /// Sleep through the declared waits instead of just logging them
    #[arg(long)]
    honor_waits: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    let set = sets::find(&args.set)
        .ok_or_else(|| format!("no built-in page set named '{}'", args.set))?;

    println!("Page set: {} ({} pages)", set.name, set.len());
    if let Some(description) = &set.description {
        println!("  {}", description);
    }

    // Print the plan an external harness would receive
    let plan = ReplayPlan::for_set(&set);
    println!("{}", serde_json::to_string_pretty(&plan)?);

    // Dry-run the set against the logging runner
    let mut runner = DryRunRunner {
        skip_waits: !args.honor_waits,
    };

    let start_time = std::time::Instant::now();
    let summary = replay::run_page_set(&set, &mut runner).await;

    println!(
        "Dry run complete. {} of {} pages in {:.2} seconds.",
        summary.pages_completed,
        summary.pages_attempted,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
