//! `log` backend
//!
//! Writes `[dlo] LEVEL message` lines to stderr. The level comes from the
//! `DLO_LOG` environment variable (`error`, `warn`, `info`, `debug`, `trace`,
//! `off`) and defaults to `info`.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

struct DloLogger {
    level: LevelFilter,
}

impl Log for DloLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "{}",
            format_line(record.level(), record.args())
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_line(level: log::Level, args: &std::fmt::Arguments) -> String {
    format!("[dlo] {:<5} {}", level, args)
}

pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the logger. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let level = level_from_env(std::env::var("DLO_LOG").ok().as_deref());
    if log::set_boxed_logger(Box::new(DloLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(level_from_env(None), LevelFilter::Info);
        assert_eq!(level_from_env(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_env(Some("loud")), LevelFilter::Info);
    }

    #[test]
    fn line_format() {
        let line = format_line(log::Level::Warn, &format_args!("App {} skipped", 620));
        assert_eq!(line, "[dlo] WARN  App 620 skipped");
    }
}
