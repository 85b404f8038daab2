//! Command-line tools for the Mythos Quest core: rule linting, map growth,
//! dice and doom inspection.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mq_world::{Preference, TileCategory};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mq",
    about = "Mythos Quest: tools for the hex-crawl rules engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a topology rule set for isolated or unreachable categories
    Lint {
        /// Rules file (JSON). Uses the built-in rules when omitted
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Category every other category must be reachable from
        #[arg(long, default_value = "street")]
        start: TileCategory,
    },

    /// Grow a map from a single tile and print what was placed
    Explore {
        /// Number of tiles to place
        #[arg(short = 'n', long, default_value = "20")]
        steps: usize,

        /// RNG seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Category preference: indoor, outdoor or any
        #[arg(short, long, default_value = "any")]
        prefer: Preference,

        /// Category of the starting tile
        #[arg(long, default_value = "street")]
        start: TileCategory,

        /// Rules file (JSON)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Write the finished map as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Roll one exchange of combat
    Combat {
        /// Attacker's dice
        #[arg(short, long, default_value = "3")]
        attack: i32,

        /// Defender's dice
        #[arg(short, long, default_value = "2")]
        defense: i32,

        /// Difficulty class for both pools
        #[arg(long, default_value = "4")]
        dc: u8,

        /// Current doom
        #[arg(long, default_value = "12", allow_negative_numbers = true)]
        doom: i32,

        /// Player health
        #[arg(long, default_value = "5")]
        hp: i32,

        /// Player sanity
        #[arg(long, default_value = "5")]
        sanity: i32,

        /// The enemy attacks the player instead
        #[arg(short, long)]
        enemy: bool,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Show the chance of passing a check for each pool size
    Odds {
        /// Largest pool to show
        #[arg(short, long, default_value = "6")]
        max_dice: i32,

        /// Difficulty class
        #[arg(long, default_value = "4")]
        dc: u8,

        /// Successes required
        #[arg(short, long, default_value = "1")]
        required: u32,
    },

    /// Show the combat modifier and severity for a doom value
    Doom {
        /// Doom value
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },

    /// Show which desperate measures are active
    Desperate {
        /// Player health
        #[arg(allow_negative_numbers = true)]
        hp: i32,

        /// Player sanity
        #[arg(allow_negative_numbers = true)]
        sanity: i32,
    },

    /// Play an automated crawl: explore, enter and search until the turns run out
    Crawl {
        /// Number of turns
        #[arg(short, long, default_value = "10")]
        turns: u32,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Category preference: indoor, outdoor or any
        #[arg(short, long, default_value = "any")]
        prefer: Preference,

        /// Rules file (JSON)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Resume from a saved session
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Save the session when done
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lint { rules, start } => commands::lint::run(rules.as_deref(), start),
        Commands::Explore {
            steps,
            seed,
            prefer,
            start,
            rules,
            save,
        } => commands::explore::run(rules.as_deref(), steps, seed, prefer, start, save.as_deref()),
        Commands::Combat {
            attack,
            defense,
            dc,
            doom,
            hp,
            sanity,
            enemy,
            seed,
        } => commands::combat::run(commands::combat::CombatArgs {
            attack,
            defense,
            dc,
            doom,
            hp,
            sanity,
            enemy,
            seed,
        }),
        Commands::Odds {
            max_dice,
            dc,
            required,
        } => commands::odds::run(max_dice, dc, required),
        Commands::Doom { value } => commands::doom::run(value),
        Commands::Desperate { hp, sanity } => commands::desperate::run(hp, sanity),
        Commands::Crawl {
            turns,
            seed,
            prefer,
            rules,
            resume,
            save,
        } => commands::crawl::run(
            rules.as_deref(),
            turns,
            seed,
            prefer,
            resume.as_deref(),
            save.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
