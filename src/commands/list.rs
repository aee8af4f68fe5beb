use anyhow::Result;
use dashkit::{Config, ItemKind, RegistryClient};
use std::env;

pub fn run() -> Result<()> {
    let current_dir = env::current_dir()?;
    let config = Config::load(&current_dir)?;
    let registry = RegistryClient::from_config(&config)?;

    let mut index = registry.get_index()?;

    if index.is_empty() {
        println!("The registry has no components.");
        println!();
        println!("Registry: {}", config.get_registry_url());
        return Ok(());
    }

    index.sort_by(|a, b| a.name.cmp(&b.name));

    for kind in ItemKind::ALL {
        let group: Vec<_> = index.iter().filter(|item| item.kind == kind).collect();
        if group.is_empty() {
            continue;
        }

        println!("{}:", heading(kind));
        for item in group {
            if item.description.is_empty() {
                println!("  {}", item.name);
            } else {
                println!("  {} - {}", item.name, item.description);
            }
        }
        println!();
    }

    println!(
        "Total: {} component{}",
        index.len(),
        if index.len() == 1 { "" } else { "s" }
    );

    Ok(())
}

fn heading(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Chart => "Charts",
        ItemKind::Ui => "UI",
        ItemKind::Layout => "Layouts",
        ItemKind::Filter => "Filters",
        ItemKind::Primitive => "Primitives",
    }
}
