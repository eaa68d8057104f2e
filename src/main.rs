mod calc;
mod cmd;
mod data;
mod picker;
mod ui;

use calc::range::parse_display_date;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "staypick", about = "storage stay date-range picker")]
struct Cli {
    /// Path to the directory containing config.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Seed the picker with a start date
    #[arg(long, value_name = "DD-MM-YYYY")]
    from: Option<String>,

    /// Seed the picker with an end date
    #[arg(long, value_name = "DD-MM-YYYY")]
    to: Option<String>,

    /// Print the selected range as JSON instead of plain text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml
    Init,
    /// Validate a range against the minimum stay without opening the picker
    Check {
        /// Start date
        #[arg(long, value_name = "DD-MM-YYYY")]
        from: String,
        /// End date
        #[arg(long, value_name = "DD-MM-YYYY")]
        to: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve config_dir to an absolute path so file I/O works regardless
    // of future directory changes within the process.
    let config_dir = if cli.config_dir.is_absolute() {
        cli.config_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.config_dir)
    };
    data::persistence::set_config_dir(config_dir.clone());

    // Auto-init when the config directory is missing or empty and the user
    // did not explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&config_dir) {
        eprintln!(
            "Config directory '{}' is missing or empty — running init...",
            config_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => {
            let from = parse_seed_date(cli.from.as_deref())?;
            let to = parse_seed_date(cli.to.as_deref())?;
            cmd::root::run(from, to, cli.json)
        }
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Check { from, to }) => cmd::check::run(&from, &to),
    }
}

fn parse_seed_date(raw: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    raw.map(parse_display_date).transpose()
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
