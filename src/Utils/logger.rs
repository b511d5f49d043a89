use chrono::Local;
use simplelog::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the log file for a run started now: `log_<date>_<time>.txt`.
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger at `level`, plus a file logger in `dir` when one is given.
///
/// Returns the path of the log file. A logger already installed by an earlier call is
/// left in place.
pub fn init_logger(level: LevelFilter, dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let mut path = None;
    if let Some(dir) = dir {
        let file_path = dir.join(log_file_name());
        let file = File::create(&file_path)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
        path = Some(file_path);
    }
    if CombinedLogger::init(loggers).is_err() {
        log::debug!("logger already initialised");
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let name = log_file_name();
        assert!(name.starts_with("log_") && name.ends_with(".txt"));
        // log_YYYY-MM-DD_HH-MM-SS.txt
        assert_eq!(name.len(), 4 + 19 + 4);
    }

    #[test]
    fn test_file_logger_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_logger(LevelFilter::Warn, Some(dir.path())).unwrap().unwrap();
        assert!(path.exists());
        assert!(path.starts_with(dir.path()));
    }
}
