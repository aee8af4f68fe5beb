use anyhow::Result;
use dashkit::{diff, Config, RegistryClient};
use std::env;
use std::fs;
use std::io::ErrorKind;

pub fn run(component: String) -> Result<()> {
    let current_dir = env::current_dir()?;
    let config = Config::load(&current_dir)?;
    let registry = RegistryClient::from_config(&config)?;

    let item = registry.get_item(&component)?;
    let target_for = config.target_resolver(&current_dir);

    println!(
        "Comparing '{}' against registry version ({} file{})",
        component,
        item.files.len(),
        if item.files.len() == 1 { "" } else { "s" }
    );
    println!();

    let mut differing = 0;
    let mut absent = 0;

    for file in &item.files {
        let target = target_for(&file.relative_name, item.kind);

        match fs::read(&target) {
            Ok(existing) => {
                if existing == file.content.as_bytes() {
                    continue;
                }
                let local = String::from_utf8_lossy(&existing);
                print!(
                    "{}",
                    diff::unified_diff(&local, &file.content, &file.relative_name)
                );
                println!();
                differing += 1;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("• {} would be created at {}", file.relative_name, target.display());
                absent += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if differing == 0 && absent == 0 {
        println!("✓ All files match the registry version");
    } else {
        if absent > 0 {
            println!();
        }
        println!(
            "{} file{} differ, {} missing locally",
            differing,
            if differing == 1 { "" } else { "s" },
            absent
        );
    }
    println!();

    Ok(())
}
