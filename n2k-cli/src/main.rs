//! NMEA 2000 CLI
//!
//! Front-end over the n2k-decoder library:
//! - replay mode: run a capture file through the decode pipeline, tallying
//!   (and optionally dumping) every decoded PGN
//! - filter mode: copy matching RAW records to a new capture, selecting by
//!   PGN number, unseen-table membership, or absence from the catalog

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use n2k_decoder::converter;
use n2k_decoder::endpoint::{CancelToken, N2kFileEndpoint, RawFileEndpoint, RawWriter};
use n2k_decoder::{catalog, FrameSink, Pipeline};

mod config;

/// NMEA 2000 capture replay and filter tool
#[derive(Parser, Debug)]
#[command(name = "n2k-cli")]
#[command(about = "Replay and filter NMEA 2000 capture files", long_about = None)]
#[command(version)]
struct Args {
    /// Capture file to replay (.raw or .n2k)
    #[arg(short, long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Print every decoded PGN to stdout
    #[arg(long)]
    dump_pgns: bool,

    /// Copy matching RAW records to this file instead of decoding
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pass only PGNs from the catalog's unseen table
    #[arg(long, conflicts_with = "unknown")]
    unseen: bool,

    /// Pass only PGNs absent from the catalog
    #[arg(long)]
    unknown: bool,

    /// Pass only this PGN
    #[arg(long, value_name = "PGN")]
    pgn: Option<u32>,

    /// Path to a configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let mut args = Args::parse();
    init_logging(args.verbose, args.quiet);

    log::info!("n2k-cli v{}", env!("CARGO_PKG_VERSION"));
    log::info!("using decoder library v{}", n2k_decoder::VERSION);

    if let Some(config_path) = args.config.take() {
        let config = config::load_config(&config_path)?;
        log::debug!("configuration loaded from {}", config_path.display());
        args.replay.get_or_insert(config.input.replay);
        args.dump_pgns |= config.output.dump_pgns;
        if args.output.is_none() {
            args.output = config.output.file;
        }
        args.unseen |= config.filter.unseen;
        args.unknown |= config.filter.unknown;
        args.pgn = args.pgn.or(config.filter.pgn);
    }

    let Some(replay) = args.replay.as_ref() else {
        println!("n2k-cli - no input specified");
        println!("\nQuick start:");
        println!("  n2k-cli --replay traffic.raw --dump-pgns");
        println!("  n2k-cli --replay traffic.raw --output unseen.raw --unseen");
        println!("\nUse --help for more options");
        return Ok(());
    };

    if args.output.is_some() || args.unseen || args.unknown || args.pgn.is_some() {
        filter_mode(replay, &args)
    } else {
        replay_mode(replay, &args)
    }
}

/// Decode a capture end to end, tallying every published message
fn replay_mode(replay: &Path, args: &Args) -> Result<()> {
    let mut pipeline = Pipeline::new();

    let tally: Rc<RefCell<BTreeMap<&'static str, usize>>> = Rc::default();
    let sink = tally.clone();
    let dump = args.dump_pgns;
    pipeline.subscribers_mut().subscribe_to_all(move |msg| {
        *sink.borrow_mut().entry(msg.name()).or_default() += 1;
        if dump {
            println!("{}: {msg:?}", msg.name());
        }
    });

    run_endpoint(replay, &mut pipeline)?;

    println!("decoded messages by type:");
    for (name, count) in tally.borrow().iter() {
        println!("  {name:32} {count}");
    }
    Ok(())
}

/// Copy RAW records that pass the PGN filters to the output
fn filter_mode(replay: &Path, args: &Args) -> Result<()> {
    if replay.extension().and_then(|e| e.to_str()) == Some("n2k") {
        bail!("filter mode operates on RAW text captures");
    }

    let passes = |pgn: u32| -> bool {
        if let Some(wanted) = args.pgn {
            return pgn == wanted;
        }
        if args.unseen {
            return catalog::in_unseen_list(pgn);
        }
        if args.unknown {
            return catalog::variants(pgn).is_none();
        }
        true
    };

    let out: Box<dyn Write> = match args.output.as_ref() {
        Some(path) => Box::new(std::fs::File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = RawWriter::new(out);

    let text = std::fs::read_to_string(replay)
        .with_context(|| format!("failed to read capture {}", replay.display()))?;
    let mut kept = 0usize;
    let mut total = 0usize;
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        total += 1;
        let record = match converter::frame_from_raw(line) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("skipping raw record: {err}");
                continue;
            }
        };
        let header = converter::decode_can_id(record.frame.id);
        if passes(header.pgn) {
            writer
                .write_frame(record.timestamp, record.frame)
                .context("failed to write output record")?;
            kept += 1;
        }
    }

    log::info!("kept {kept} of {total} records");
    Ok(())
}

fn run_endpoint(replay: &Path, pipeline: &mut Pipeline) -> Result<()> {
    let cancel = CancelToken::new();
    match replay.extension().and_then(|e| e.to_str()) {
        Some("n2k") => N2kFileEndpoint::new(replay)
            .run(pipeline, &cancel)
            .with_context(|| format!("replaying {}", replay.display())),
        _ => RawFileEndpoint::new(replay)
            .run(pipeline, &cancel)
            .with_context(|| format!("replaying {}", replay.display())),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new().filter_level(level).init();
}
