//! Sports Donations - prints the default dashboard summary for the configured source.

use anyhow::Context;
use log::info;
use sports_donations::{DashboardConfig, DataLoader, Dataset, Selection};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    info!("Using data source {}", config.source);

    let loader = DataLoader::new(config.source.clone());
    let dataset = Dataset::load(&loader)
        .with_context(|| format!("Failed to prepare donations from {}", config.source))?;

    println!("{}", config.title);
    println!("{}\n", config.description());

    let years: Vec<String> = dataset.election_years().iter().map(|y| y.to_string()).collect();
    println!("Election years: All, {}", years.join(", "));
    println!("Leagues: All, {}\n", dataset.leagues().join(", "));

    print!("{}", dataset.view(Selection::All, Selection::All, ""));
    Ok(())
}
