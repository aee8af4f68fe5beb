use anyhow::Result;
use dashkit::{Config, ItemKind, CONFIG_FILE};
use std::env;

pub fn run() -> Result<()> {
    let current_dir = env::current_dir()?;

    // Check if dashkit.toml already exists
    if Config::exists(&current_dir) {
        println!("✓ {} already exists in this directory", CONFIG_FILE);
        println!();
        println!(
            "To reinitialize, delete {} and run 'dashkit init' again.",
            CONFIG_FILE
        );
        return Ok(());
    }

    println!("Initializing dashkit project...");
    println!();

    let config = Config::default();
    config.save(&current_dir)?;

    println!("✓ Created {}", CONFIG_FILE);
    println!();
    println!("Registry: {}", config.get_registry_url());
    println!("Components will be installed under:");
    for kind in ItemKind::ALL {
        println!("  {}: {}", kind, config.targets.dir_for(kind));
    }
    println!();
    println!("Next steps:");
    println!("  • Browse components: dashkit list");
    println!("  • Add a component: dashkit add <component>");
    println!();

    Ok(())
}
