use clap::Parser;
use replay_page::ReplayPlan;
use replay_page::actions::Action;
use replay_page::config::PageSetConfig;
use replay_page::pageset::PageSet;
use replay_page::sets;

mod args;
use args::{Args, Mode, build_filter};

fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if args.list {
        list_sets();
        return;
    }

    let Some(target) = args.set.clone() else {
        eprintln!("No page set given. Use --list to see the built-in sets.");
        std::process::exit(2);
    };

    ::log::info!("Loading page set: {}", target);

    let set = match load_set(&args, &target) {
        Ok(set) => set,
        Err(e) => {
            ::log::error!("Failed to load page set '{}': {}", target, e);
            std::process::exit(1);
        }
    };

    // Build the page filter from the command-line flags
    let filter = match build_filter(&args) {
        Ok(filter) => filter,
        Err(e) => {
            ::log::error!("Invalid filter pattern: {}", e);
            std::process::exit(2);
        }
    };

    match args.mode {
        Mode::Validate => validate_set(&set),
        Mode::Plan => print_plan(&ReplayPlan::for_set_filtered(&set, &filter)),
        Mode::Export => export_plan(&ReplayPlan::for_set_filtered(&set, &filter)),
    }
}

/// Resolve the target to a page set, from the registry or a config file
fn load_set(args: &Args, target: &str) -> Result<PageSet, Box<dyn std::error::Error>> {
    if args.config_file {
        let config = PageSetConfig::from_file(target)?;
        Ok(config.into_page_set()?)
    } else {
        sets::find(target).ok_or_else(|| format!("no built-in page set named '{}'", target).into())
    }
}

/// Print the built-in page sets
fn list_sets() {
    for set in sets::registry() {
        let pages = if set.len() == 1 { "page" } else { "pages" };
        println!("{} ({} {})", set.name, set.len(), pages);
        if let Some(description) = &set.description {
            println!("    {}", description);
        }
    }
}

/// Validate the set and report the outcome
fn validate_set(set: &PageSet) {
    match set.validate() {
        Ok(()) => {
            println!("Page set '{}' is valid ({} pages).", set.name, set.len());
        }
        Err(e) => {
            ::log::error!("Page set '{}' is invalid: {}", set.name, e);
            std::process::exit(1);
        }
    }
}

/// Print the replay plan as text
fn print_plan(plan: &ReplayPlan) {
    println!(
        "Replay plan for '{}' (archive: {})",
        plan.set_name, plan.archive_data_file
    );

    for (i, run) in plan.runs.iter().enumerate() {
        println!("{:>3}. {}", i + 1, run.entry.url);
        if let Some(description) = &run.entry.description {
            println!("     why: {}", description);
        }
        for step in &run.steps {
            match step {
                Action::Navigate { url } => println!("     navigate {}", url),
                Action::Wait { seconds } => println!("     wait {}s", seconds),
            }
        }
    }

    println!("{} pages planned.", plan.len());
}

/// Emit the replay plan as JSON for an external harness
fn export_plan(plan: &ReplayPlan) {
    match serde_json::to_string_pretty(plan) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            ::log::error!("Failed to serialize plan: {}", e);
            std::process::exit(1);
        }
    }
}
