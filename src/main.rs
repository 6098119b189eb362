//! Command line front end for the chesscore library.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::{File, read_to_string};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};
use chrono::Local;
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config as LogConfig};
use chesscore::book::{MemoryBook, suggest_move};
use chesscore::chess::{HashedPosition, Position, variations};
use chesscore::config::Config;
use chesscore::engine::SearchWorker;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() -> Result<(), Error> {
    let fen_arg = Arg::with_name("fen")
        .long("fen")
        .short("f")
        .value_name("FEN_STRING")
        .takes_value(true)
        .default_value(START_FEN)
        .hide_default_value(true)
        .help("Position to start from in Forsyth-Edwards Notation (FEN)");

    let matches =
        App::new("chesscore")
            .version(crate_version!())
            .author("Mike Leany")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from FILE instead of ~/.chesscore/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("chesscore.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(Arg::with_name("positions")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("play")
                .about("Plays a sequence of moves and describes the resulting position")
                .arg(fen_arg.clone())
                .arg(Arg::with_name("book")
                    .long("book")
                    .short("b")
                    .value_name("BOOK_FILE")
                    .takes_value(true)
                    .help("Suggests a reply from an opening book in YAML"))
                .arg(Arg::with_name("moves")
                    .value_name("MOVES")
                    .multiple(true)
                    .help("Moves in standard algebraic notation (SAN)")))
            .subcommand(SubCommand::with_name("idle")
                .about("Counts variations on a background thread until the time runs out, \
                        then cancels the count")
                .arg(fen_arg)
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .default_value("6")
                    .help("Depth to count to"))
                .arg(Arg::with_name("time")
                    .long("time")
                    .short("t")
                    .value_name("MILLISECONDS")
                    .takes_value(true)
                    .default_value("1000")
                    .help("Time allowed before the count is cancelled")))
            .get_matches();

    init_logging(&matches)?;
    let config = Config::discover(matches.value_of_os("config").map(Path::new))?;

    match matches.subcommand() {
        ("counts", Some(matches)) => {
            let depth = parse_number(matches, "depth")?;

            println!();
            for fen in matches.values_of("positions").expect("INFALLIBLE") {
                let mut pos: Position = fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))?;
                println!("{}", fen);
                let count = variations::print(&mut pos, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        ("play", Some(matches)) => {
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let mut pos = HashedPosition::from_fen_hashed(fen, config.zobrist_keys())
                .map_err(|err| Error(format!("{}: {}", fen, err)))?;

            for text in matches.values_of("moves").into_iter().flatten() {
                pos.play(text).map_err(|err| Error(format!("{}: {}", text, err)))?;
            }
            describe(&pos);

            let book = matches.value_of_os("book").map(PathBuf::from).or_else(|| config.book.clone());
            if let Some(path) = book {
                let book = MemoryBook::from_yaml(&read_to_string(&path)?)
                    .map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
                match suggest_move(&book, &pos) {
                    Some(record) => println!("Book move:     {}", record.to_san(&pos)),
                    None => println!("Book move:     none"),
                }
            }
        },
        ("idle", Some(matches)) => {
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let depth = parse_number(matches, "depth")?;
            let budget = Duration::from_millis(parse_number(matches, "time")? as u64);
            let pos: Position = fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))?;

            let start = Instant::now();
            let worker = SearchWorker::spawn(pos, move |mut pos, stop| {
                variations::count_until(&mut pos, depth, &|| stop.is_stopped())
            });
            while !worker.is_finished() && start.elapsed() < budget {
                thread::sleep(Duration::from_millis(10));
            }

            match worker.cancel().flatten() {
                Some(count) => println!("Depth {} total:\t{:12}", depth, count),
                None => println!("Depth {} cancelled after {:?}", depth, start.elapsed()),
            }
        },
        _ => unreachable!(),
    }

    Ok(())
}

fn init_logging(matches: &ArgMatches<'_>) -> Result<(), Error> {
    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            LogConfig::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, LogConfig::default(), std::io::sink())
    };
    info!("chesscore {} session started {}", crate_version!(), Local::now().format("%Y-%m-%d %H:%M:%S"));

    Ok(())
}

fn parse_number(matches: &ArgMatches<'_>, name: &str) -> Result<usize, Error> {
    matches
        .value_of(name)
        .expect("INFALLIBLE")
        .parse()
        .map_err(|_| Error(format!("{} must be numeric", name)))
}

fn describe(pos: &HashedPosition) {
    let legal = pos.legal_moves().len();
    let status = if pos.is_checkmate() {
        "checkmate"
    } else if pos.is_stalemate() {
        "stalemate"
    } else if pos.in_check(pos.turn()) {
        "check"
    } else if !pos.sufficient_material_to_checkmate() {
        "insufficient material"
    } else {
        "in play"
    };

    println!("FEN:           {}", pos);
    println!("Hash:          {:016x}", pos.hash());
    println!("Legal moves:   {}", legal);
    println!("Status:        {}", status);
    if pos.is_repetition(3) {
        println!("Repetition:    threefold");
    }
    println!("Moves:         {}", pos.history_text().join(" "));
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<chesscore::chess::Error> for Error {
    fn from(err: chesscore::chess::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<chesscore::config::ConfigError> for Error {
    fn from(err: chesscore::config::ConfigError) -> Self {
        Error(err.to_string())
    }
}
