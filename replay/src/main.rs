use clap::{Parser, ValueEnum};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};
use zkarchive_consensus_core::config::{constants::MAINNET_CONSTANTS, load_constants};
use zkarchive_core::{error, info, log::init_logger, span::Span};
use zkarchive_eventsindex::{ArchiveReconstructor, model::ArchiveRow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Events,
    Actions,
}

/// Archive row replayer
///
/// Reads the JSON rows of an events or actions query and prints the reassembled,
/// canonical per-block records as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Protocol constants file (TOML). Mainnet constants are used when omitted
    #[arg(short, long)]
    constants: Option<PathBuf>,

    /// JSON array of archive rows, `-` for stdin
    #[arg(short, long, default_value = "-")]
    rows: String,

    /// Whether the rows carry events or actions
    #[arg(short, long, value_enum, default_value_t = Kind::Events)]
    kind: Kind,

    /// Logging level, in `RUST_LOG` syntax
    #[arg(long = "loglevel", default_value = "info")]
    log_level: String,

    /// Directory for rolled log files. Logs go to stdout only when omitted
    #[arg(long = "logdir")]
    log_dir: Option<String>,
}

type ReplayResult<T> = Result<T, Box<dyn std::error::Error>>;

fn read_rows(source: &str) -> ReplayResult<Vec<ArchiveRow>> {
    let json = if source == "-" {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json)?;
        json
    } else {
        fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&json)?)
}

fn replay(args: &Args) -> ReplayResult<String> {
    let constants = match &args.constants {
        Some(path) => load_constants(path)?,
        None => MAINNET_CONSTANTS,
    };
    info!("Grace period ends at slot {}", constants.grace_period_end());

    let rows = read_rows(&args.rows)?;
    let reconstructor = ArchiveReconstructor::new(&constants);
    let span = Span::new("replay");
    let output = match args.kind {
        Kind::Events => {
            let blocks = reconstructor.events(rows, Some(&span))?;
            info!("Reassembled {} event blocks", blocks.len());
            serde_json::to_string_pretty(&blocks)?
        }
        Kind::Actions => {
            let blocks = reconstructor.actions(rows, Some(&span))?;
            info!("Reassembled {} action blocks", blocks.len());
            serde_json::to_string_pretty(&blocks)?
        }
    };
    Ok(output)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logger(args.log_dir.as_deref(), &args.log_level) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match replay(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Replay failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
