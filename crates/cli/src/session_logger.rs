use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record};

const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File-backed log sink. Every run writes to its own timestamped file
/// under a `logs/` directory so sessions never interleave.
pub struct SessionLogger {
    writer: Mutex<BufWriter<File>>,
    level: LevelFilter,
}

impl SessionLogger {
    fn create(path: &Path, level: LevelFilter) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            level,
        })
    }
}

impl Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format(LINE_TIMESTAMP_FORMAT);
        let line = record.line().unwrap_or(0);
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(_) => return,
        };
        let _ = writeln!(
            writer,
            "[{timestamp}] {line} {} - {} - {}",
            record.target(),
            record.level(),
            record.args()
        );
        // Errors should hit disk even if the process aborts right after
        if record.level() <= Level::Error {
            let _ = writer.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// `log::set_boxed_logger` takes ownership, so the shared sink goes in
/// behind this delegating newtype while the handle keeps its own `Arc`.
struct LoggerRef(Arc<SessionLogger>);

impl Log for LoggerRef {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.0.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.0.log(record);
    }

    fn flush(&self) {
        self.0.flush();
    }
}

/// Keeps the session log reachable after installation, for the final
/// flush and for telling the user where the log went.
pub struct SessionLogHandle {
    logger: Arc<SessionLogger>,
    path: PathBuf,
}

impl SessionLogHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) {
        self.logger.flush();
    }
}

/// Creates `logs/<timestamp>.log` under `root` and installs it as the
/// global logger. Fails if a logger is already installed.
pub fn init(root: &Path, level: LevelFilter) -> Result<SessionLogHandle, Box<dyn std::error::Error>> {
    let dir = root.join("logs");
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!(
        "{}.log",
        chrono::Local::now().format(LOG_TIMESTAMP_FORMAT)
    ));

    let logger = Arc::new(SessionLogger::create(&path, level)?);
    log::set_boxed_logger(Box::new(LoggerRef(logger.clone())))?;
    log::set_max_level(level);

    Ok(SessionLogHandle { logger, path })
}
