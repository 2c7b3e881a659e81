//! CLI frontend for the Zeitenwanderer timeline tracker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "zw",
    about = "Zeitenwanderer — track entities across space, time, and realities",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new world file
    Init {
        /// Name of the world to create
        name: String,

        /// Path of the world file to write (default: `<name>.json`)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Validate a world file and report its contents
    Check {
        /// Path of the world file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,
    },

    /// List entities of a kind, optionally filtered
    List {
        /// Entity kind: locations, travelers, or events
        kind: String,

        /// Filter as key=value (repeatable), e.g. tagged_any=war,plague
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Path of the world file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,
    },

    /// Show detailed information about an entity
    Show {
        /// Prefixed entity id, e.g. location-<uuid>
        id: String,

        /// Path of the world file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,
    },

    /// Print the timeline of a location or traveler
    Timeline {
        /// Prefixed id of a location or traveler
        id: String,

        /// Filter applied to candidate events (repeatable)
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Path of the world file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name, file } => commands::init::run(&name, file.as_deref()),
        Commands::Check { file } => commands::check::run(&file),
        Commands::List {
            kind,
            filters,
            file,
        } => commands::list::run(&file, &kind, &filters),
        Commands::Show { id, file } => commands::show::run(&file, &id),
        Commands::Timeline { id, filters, file } => {
            commands::timeline::run(&file, &id, &filters)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
