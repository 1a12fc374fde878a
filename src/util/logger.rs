use log::{LevelFilter, Log, Metadata, Record};
use std::{io::Write, sync::OnceLock, time::Instant};

static LOGGER: Logger = Logger;
static STARTED: OnceLock<Instant> = OnceLock::new();

/// Stderr logger, prefixed with seconds since startup.
struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = STARTED.get_or_init(Instant::now).elapsed().as_secs_f32();
        // a closed stderr isn't worth crashing over
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:>9.3} {:<5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) { let _ = std::io::stderr().flush(); }
}

fn level_from_env() -> LevelFilter {
    match std::env::var("TWISTER_LOG") {
        Ok(level) => level.parse().unwrap_or(LevelFilter::Info),
        Err(_) => LevelFilter::Info,
    }
}

/// Installs the logger. Level comes from `TWISTER_LOG` (defaults to info).
pub fn init() {
    STARTED.get_or_init(Instant::now);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from_env());
    }
}
