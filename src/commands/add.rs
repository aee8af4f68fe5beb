use anyhow::Result;
use dashkit::{
    aggregate, install_all, resolve, CancelFlag, Config, InstallOutcome, OverwritePrompt,
    RegistryClient,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn run(components: Vec<String>, overwrite: bool, dry_run: bool) -> Result<()> {
    if components.is_empty() {
        anyhow::bail!(
            "No components given\n\n\
            Usage: dashkit add <component>...\n\
            Browse available components with: dashkit list"
        );
    }

    let current_dir = env::current_dir()?;
    let config = Config::load(&current_dir)?;
    let registry = RegistryClient::from_config(&config)?;
    let overwrite = overwrite || config.install.overwrite;

    if dry_run {
        println!("[DRY RUN] Would add: {}", components.join(", "));
    } else {
        println!("Adding: {}", components.join(", "));
    }
    println!();

    // Resolve the requested components and everything they pull in
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message("Resolving components...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let resolution = resolve(&components, &registry);

    let requested_found = resolution
        .resolved
        .iter()
        .filter(|item| components.contains(&item.name))
        .count();
    let dep_count = resolution.resolved.len() - requested_found;

    if resolution.resolved.is_empty() {
        spinner.finish_and_clear();
    } else if dep_count > 0 {
        spinner.finish_with_message(format!(
            "✓ Resolved {} components (including {} dependencies)",
            resolution.resolved.len(),
            dep_count
        ));
    } else {
        spinner.finish_with_message(format!(
            "✓ Resolved {} component{}",
            resolution.resolved.len(),
            if resolution.resolved.len() == 1 { "" } else { "s" }
        ));
    }

    for missing in &resolution.unresolved {
        println!("⚠ Could not resolve '{}': {}", missing.name, missing.reason);
    }

    if resolution.resolved.is_empty() {
        anyhow::bail!(
            "None of the requested components could be resolved\n\n\
            Check the names with: dashkit list"
        );
    }

    let requested_missing: Vec<&str> = resolution
        .unresolved
        .iter()
        .filter(|missing| missing.requested)
        .map(|missing| missing.name.as_str())
        .collect();

    let target_for = config.target_resolver(&current_dir);

    if dry_run {
        println!();
        for item in &resolution.resolved {
            println!("[DRY RUN] Would install {}", item.name);
            for file in &item.files {
                let target = target_for(&file.relative_name, item.kind);
                println!("  [DRY RUN] Would write {}", target.display());
            }
        }
        if !resolution.package_dependencies.is_empty() {
            println!();
            println!("[DRY RUN] Package dependencies you would still need:");
            for dep in &resolution.package_dependencies {
                println!("  • {}", dep);
            }
        }
        println!();
        println!(
            "[DRY RUN] Would install {} component{}, no files written",
            resolution.resolved.len(),
            if resolution.resolved.len() == 1 { "" } else { "s" }
        );
        println!();

        if !requested_missing.is_empty() {
            anyhow::bail!("could not resolve: {}", requested_missing.join(", "));
        }
        return Ok(());
    }

    // A 'q' answer at any prompt stops the rest of the batch
    let cancel: CancelFlag = Arc::new(AtomicBool::new(false));
    let confirm: Option<OverwritePrompt> = if overwrite {
        None
    } else {
        let cancel = Arc::clone(&cancel);
        Some(Arc::new(move |name: &str, diff: &str| {
            println!();
            println!("{} already exists with different content:", name);
            println!();
            print!("{}", diff);
            println!();
            print!("Overwrite {}? [y/N/q] ", name);
            let _ = std::io::stdout().flush();

            let mut answer = String::new();
            if std::io::stdin().read_line(&mut answer).is_err() {
                return false;
            }
            let answer = answer.trim().to_lowercase();

            if answer == "q" {
                cancel.store(true, Ordering::SeqCst);
                return false;
            }
            answer == "y" || answer == "yes"
        }))
    };

    let reports = install_all(
        &resolution.resolved,
        &target_for,
        overwrite,
        confirm.as_ref(),
        Some(&cancel),
    );

    println!();
    for report in &reports {
        println!("{}:", report.name);
        for file in &report.files {
            match file.outcome {
                InstallOutcome::Created => println!("  ✓ created {}", file.path.display()),
                InstallOutcome::Updated => println!("  ✓ updated {}", file.path.display()),
                InstallOutcome::Skipped => {
                    let note = file.note.as_deref().unwrap_or("unchanged");
                    println!("  - skipped {} ({})", file.path.display(), note);
                }
                InstallOutcome::Failed => {
                    let note = file.note.as_deref().unwrap_or("unknown error");
                    println!("  ✗ failed {}: {}", file.path.display(), note);
                }
            }
        }
    }

    let summary = aggregate(&reports);

    if cancel.load(Ordering::SeqCst) {
        println!();
        println!(
            "⚠ Stopped early: {} of {} component{} processed",
            reports.len(),
            resolution.resolved.len(),
            if resolution.resolved.len() == 1 { "" } else { "s" }
        );
        anyhow::bail!("installation cancelled");
    }

    if !resolution.package_dependencies.is_empty() {
        println!();
        println!("Package dependencies (install with your package manager):");
        for dep in &resolution.package_dependencies {
            println!("  • {}", dep);
        }
    }

    println!();
    if summary.failed == 0 {
        println!(
            "✓ Installed {} component{} ({})",
            reports.len(),
            if reports.len() == 1 { "" } else { "s" },
            summary
        );
    } else {
        println!(
            "Processed {} component{} ({})",
            reports.len(),
            if reports.len() == 1 { "" } else { "s" },
            summary
        );
    }
    println!();

    if summary.failed > 0 {
        anyhow::bail!(
            "{} file{} could not be written",
            summary.failed,
            if summary.failed == 1 { "" } else { "s" }
        );
    }

    if !requested_missing.is_empty() {
        anyhow::bail!("could not resolve: {}", requested_missing.join(", "));
    }

    Ok(())
}
