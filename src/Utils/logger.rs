//! logging initialisation shared by the CLI, the benches and the user code
use chrono::Local;
use log::{info, warn};
use simplelog::*;
use std::fs::File;

/// maps a loglevel string to a filter; unknown strings fall back to `Info`
pub fn level_filter(loglevel: &str) -> LevelFilter {
    match loglevel.trim().to_lowercase().as_str() {
        "off" | "none" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        other => {
            eprintln!("unknown loglevel '{}', using info", other);
            LevelFilter::Info
        }
    }
}

/// name of the log file: log_%Y-%m-%d_%H-%M-%S.txt
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger plus, when `to_file` is set, a timestamped log file. A second call
/// (the global logger is already set) only reports the fact and returns false.
pub fn init_logger(loglevel: &str, to_file: bool) -> bool {
    let level = level_filter(loglevel);
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if to_file {
        let name = log_file_name();
        match File::create(&name) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(err) => eprintln!("cannot create log file {}: {}", name, err),
        }
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            info!("logger initialised with level {}", level);
            true
        }
        Err(_) => {
            warn!("logger already initialised");
            false
        }
    }
}
