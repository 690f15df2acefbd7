mod config;
mod error;
mod shell;
mod tracker;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::config::{TrackerConfig, DEFAULT_EXPORT_FILE, DEFAULT_INPUT_FILE, ENV_EXPORT_FILE, ENV_INPUT_FILE};
use crate::shell::Shell;
use crate::tracker::FrequencyTracker;

#[derive(Parser)]
#[command(name = "corner_grocer")]
#[command(version = "0.1.0")]
#[command(about = "🛒 Corner Grocer item tracker: purchase counts from a list of items")]
struct Cli {
    /// Whitespace-separated item list to count
    #[arg(short, long, global = true, env = ENV_INPUT_FILE, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Where option 4 / `save` writes the frequency dump
    #[arg(short, long, global = true, env = ENV_EXPORT_FILE, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,

    /// Glyph used for histogram bars
    #[arg(short, long, global = true, default_value_t = config::DEFAULT_MARKER)]
    marker: char,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how many times one item was purchased
    Lookup { item: String },
    /// List every item with its count
    List,
    /// Draw a histogram of purchase counts
    Histogram,
    /// Write the frequency dump and exit
    Save,
    /// Print the counts stored in an existing frequency dump
    Saved,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN })
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let code = match run(cli, stdin.lock(), &mut out, &mut err) {
        Ok(code) => code,
        Err(e) => {
            error!("❌ {:#}", e);
            let _ = writeln!(err, "Error: {:#}", e);
            1
        }
    };

    let _ = out.flush();
    std::process::exit(code);
}

/// Loads the item list and runs the menu or a single command. Returns the process exit status.
fn run<R: BufRead, W: Write, E: Write>(cli: Cli, input: R, out: &mut W, err: &mut E) -> Result<i32> {
    let config = TrackerConfig::new(cli.input, cli.output, cli.marker);

    // the dump can be inspected without the item list
    if let Some(Commands::Saved) = cli.command {
        return show_saved(&config, out);
    }

    let tracker = match FrequencyTracker::load(&config.input_path) {
        Ok(t) => t,
        Err(e) => {
            error!("❌ {}", e);
            writeln!(err, "Error: Could not open {}", config.input_path.display())?;
            writeln!(err, "Program terminated due to file load error.")?;
            return Ok(1);
        }
    };

    match cli.command {
        Some(cmd) => handle_command(cmd, &tracker, &config, out),
        None => {
            info!("🛒 Starting interactive menu");
            Shell::new(&tracker, &config, input, out)
                .run()
                .context("console I/O failed")?;
            Ok(0)
        }
    }
}

fn handle_command<W: Write>(cmd: Commands, tracker: &FrequencyTracker, config: &TrackerConfig, out: &mut W) -> Result<i32> {
    match cmd {
        Commands::Lookup { item } => shell::report_lookup(out, tracker, &item)?,
        Commands::List => shell::report_frequencies(out, tracker)?,
        Commands::Histogram => shell::report_histogram(out, tracker, config.marker)?,
        Commands::Save => {
            if !shell::report_save(out, tracker, &config.export_path)? {
                return Ok(1);
            }
        }
        Commands::Saved => return show_saved(config, out),
    }

    out.flush()?;
    Ok(0)
}

fn show_saved<W: Write>(config: &TrackerConfig, out: &mut W) -> Result<i32> {
    let pairs = tracker::read_dump(&config.export_path)
        .with_context(|| format!("failed to read {}", config.export_path.display()))?;
    shell::report_saved(out, &config.export_path, &pairs)?;
    out.flush()?;
    Ok(0)
}
