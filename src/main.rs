use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

mod commands;

/// Dashkit - A component registry installer for dashboard UI kits
#[derive(Parser)]
#[command(name = "dashkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a dashkit project in the current directory
    Init,

    /// Add components and their registry dependencies to the project
    Add {
        /// Component names (e.g., kpi-card bar-chart)
        components: Vec<String>,

        /// Overwrite existing files that differ without asking
        #[arg(long)]
        overwrite: bool,

        /// Show what would be written without touching any files
        #[arg(long)]
        dry_run: bool,
    },

    /// List components available in the registry
    List,

    /// Search registry components by name, category or description
    Search {
        /// Search query
        query: String,
    },

    /// Show how a component's registry content differs from local files
    Diff {
        /// Component name
        component: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dashkit=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Add {
            components,
            overwrite,
            dry_run,
        } => commands::add::run(components, overwrite, dry_run),
        Commands::List => commands::list::run(),
        Commands::Search { query } => commands::search::run(query),
        Commands::Diff { component } => commands::diff::run(component),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "dashkit", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
