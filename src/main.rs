use anyhow::Result;
use clap::Parser;
use log::{error, info};

use deputy_dedup::cli::{Cli, Command, delete_config, search_config};
use deputy_dedup::db::make_pool;
use deputy_dedup::export::export_groups_csv;
use deputy_dedup::logging::init_tracing_from_env;
use deputy_dedup::models::SearchOutcome;
use deputy_dedup::orchestrator::{delete_deputy, find_duplicate_deputies};
use deputy_dedup::util::envfile::{load_dotenv_if_present, write_env_template};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    load_dotenv_if_present()?;
    init_tracing_from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::EnvTemplate { path } => {
            write_env_template(&path)?;
            println!("Wrote {}. Copy to .env and edit values as needed.", path);
            Ok(())
        }
        Command::Search {
            db,
            acting_user,
            threshold,
            out,
            json,
        } => {
            let cfg = match search_config(&db, &acting_user, threshold, out, json) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(2);
                }
            };
            let pool = make_pool(&cfg.database).await?;
            let outcome =
                find_duplicate_deputies(&pool, &cfg.acting_user, cfg.search.threshold).await;

            if cfg.export.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_search_summary(&outcome);
            }
            if outcome.success {
                if let Some(path) = &cfg.export.out_path {
                    export_groups_csv(&outcome.duplicate_groups, path)?;
                    info!("Wrote CSV report to {}", path);
                }
            }
            if !outcome.success {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Delete {
            db,
            acting_user,
            deputy_id,
        } => {
            let cfg = match delete_config(&db, &acting_user) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(2);
                }
            };
            let pool = make_pool(&cfg.database).await?;
            let outcome = delete_deputy(&pool, &cfg.acting_user, &deputy_id).await;
            if outcome.success {
                println!("Deleted deputy {}.", deputy_id);
                Ok(())
            } else {
                eprintln!(
                    "Delete failed: {}",
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
                std::process::exit(1);
            }
        }
    }
}

fn print_search_summary(outcome: &SearchOutcome) {
    if !outcome.success {
        eprintln!(
            "Search failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    if outcome.duplicate_groups.is_empty() {
        println!("No duplicates found.");
        return;
    }
    println!(
        "{} duplicate group(s), {} record(s) involved:",
        outcome.duplicate_groups.len(),
        outcome.total_duplicates
    );
    for (idx, group) in outcome.duplicate_groups.iter().enumerate() {
        println!();
        println!(
            "Group {} ({} records): {}",
            idx + 1,
            group.count,
            group.normalized
        );
        for deputy in &group.deputies {
            let mut details: Vec<&str> = Vec::new();
            if let Some(status) = deputy.deputy_status.as_deref() {
                details.push(status);
            }
            if let Some(council) = deputy.council_name.as_deref() {
                details.push(council);
            }
            if let Some(gov) = deputy.governorate.as_deref() {
                details.push(gov);
            }
            println!(
                "  {:>3.0}%  {}  [{}]{}{}",
                deputy.similarity * 100.0,
                deputy.full_name,
                deputy.id,
                if details.is_empty() { "" } else { "  " },
                details.join(", ")
            );
        }
    }
}
