mod cleaner;
mod config;
mod scanner;
mod selector;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use config::{CleanConfig, DEFAULT_BASE, DEFAULT_GAS_COUNT, DEFAULT_PARAMS};
use dialoguer::Confirm;
use scanner::{format_size, FoundEntry, TargetScan};
use selector::GroupedSelector;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picclean")]
#[command(about = "Wipe rendered plot images from a simulation output tree")]
#[command(version)]
struct Cli {
    /// Output tree root containing the gas<N>/<param>/pic directories
    #[arg(default_value = DEFAULT_BASE)]
    base: PathBuf,

    /// Parameter directory to clean; repeatable (defaults to conc, temp, pressure)
    #[arg(long = "param", value_name = "NAME")]
    params: Vec<String>,

    /// Number of gas indices, iterated as gas0..gas<N-1>
    #[arg(long, value_name = "N", default_value_t = DEFAULT_GAS_COUNT)]
    gases: u32,

    /// Show what would be deleted without deleting
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Skip selection and confirmation, wipe everything
    #[arg(short = 'y', long)]
    yes: bool,
}

fn build_config(cli: &Cli) -> CleanConfig {
    // No --param flags means the full default list, matching the
    // pipeline's own output configuration.
    let params = if cli.params.is_empty() {
        DEFAULT_PARAMS.iter().map(|p| p.to_string()).collect()
    } else {
        cli.params.clone()
    };

    CleanConfig {
        base: cli.base.clone(),
        params,
        gas_count: cli.gases,
    }
}

fn print_listing(scans: &[TargetScan]) {
    for scan in scans {
        if scan.entries.is_empty() {
            continue;
        }
        println!("  {}", scan.target.label().bold());
        for entry in &scan.entries {
            println!("    {:<40}  {:>10}", entry.name(), entry.size_human());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    println!(
        "{} {}...\n",
        "Scanning".cyan().bold(),
        config.base.display()
    );

    let scans = scanner::scan(&config)?;
    let entry_count = scanner::total_entries(&scans);
    let total_size = scanner::total_size(&scans);

    if entry_count == 0 {
        println!("{}", "All pic directories are already empty.".yellow());
        return Ok(());
    }

    println!(
        "Found {} entries in {} pic directories ({})\n",
        entry_count.to_string().green().bold(),
        scans.len(),
        format_size(total_size).green().bold()
    );

    if cli.dry_run {
        println!("{}", "Dry run - nothing will be deleted:\n".yellow());
        print_listing(&scans);
        println!(
            "\n{} {}",
            "Total:".bold(),
            format_size(total_size).green().bold()
        );
        return Ok(());
    }

    let selected: Vec<FoundEntry> = if cli.yes {
        scans.into_iter().flat_map(|s| s.entries).collect()
    } else {
        let picked = GroupedSelector::new(scans).run()?;

        if picked.is_empty() {
            println!("{}", "Nothing selected.".yellow());
            return Ok(());
        }

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} entries ({})?",
                picked.len(),
                format_size(picked.iter().map(|e| e.size_bytes).sum())
            ))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }

        picked
    };

    println!("{} {} entries...", "Deleting".red().bold(), selected.len());

    let result = cleaner::clean(selected);

    if !result.failed.is_empty() {
        println!("\n{}", "Failed to delete:".red());
        for (entry, err) in &result.failed {
            println!("  {} - {}", entry.path.display(), err);
        }
    }

    if !result.deleted.is_empty() {
        println!(
            "\n{} Cleaned {} in {} entries",
            "Done!".green().bold(),
            format_size(result.total_cleaned()).green().bold(),
            result.deleted.len().to_string().green()
        );
    }

    Ok(())
}
