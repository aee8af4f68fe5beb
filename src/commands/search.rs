use anyhow::Result;
use dashkit::{CatalogItem, Config, RegistryClient};
use std::env;

pub fn run(query: String) -> Result<()> {
    println!("Searching for: {}", query);
    println!();

    let current_dir = env::current_dir()?;
    let config = Config::load(&current_dir)?;
    let registry = RegistryClient::from_config(&config)?;

    let index = registry.get_index()?;
    let needle = query.to_lowercase();
    let mut results: Vec<&CatalogItem> = index
        .iter()
        .filter(|item| matches_query(item, &needle))
        .collect();
    results.sort_by(|a, b| a.name.cmp(&b.name));

    if results.is_empty() {
        println!("No components found matching '{}'", query);
        println!();
        println!("Try a different search term, or browse everything with: dashkit list");
        return Ok(());
    }

    println!(
        "Found {} component{}:",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    );
    for item in &results {
        if item.description.is_empty() {
            println!("  {} [{}]", item.name, item.kind);
        } else {
            println!("  {} [{}] - {}", item.name, item.kind, item.description);
        }
    }
    println!();

    Ok(())
}

fn matches_query(item: &CatalogItem, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(needle))
        || item
            .subcategory
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(needle))
}
