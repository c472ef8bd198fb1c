// A tiny stderr logger for the `log` crate. The library half of this crate
// only emits `debug!` and `trace!` records, so all we need is a level filter
// (configured through `RECUR_LOG`) and a readable line format.

use std::sync::{Mutex, PoisonError};

use {jiff::tz::TimeZone, log::Log};

use crate::style::Theme;

/// Returns the maximum log level requested via the `RECUR_LOG` environment
/// variable.
///
/// When the variable isn't set (or is empty), logging is disabled.
pub fn level_from_env() -> anyhow::Result<log::LevelFilter> {
    let Some(val) = std::env::var_os("RECUR_LOG") else {
        return Ok(log::LevelFilter::Off);
    };
    let Some(val) = val.to_str() else {
        anyhow::bail!(
            "`RECUR_LOG` environment variable is not valid UTF-8: {val:?}"
        )
    };
    Ok(match val {
        "" | "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level `{unk}` in `RECUR_LOG`"),
    })
}

/// Writes every record it is given to stderr.
///
/// Filtering is left entirely to `log::set_max_level`.
#[derive(Debug)]
pub struct Logger {
    tz: Mutex<Option<TimeZone>>,
}

impl Logger {
    /// Install a new logger as the global logger and return it.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        let logger = Box::leak(Box::new(Logger { tz: Mutex::new(None) }));
        log::set_logger(logger)?;
        Ok(logger)
    }

    /// Render timestamps in the given time zone instead of UTC.
    pub fn set_time_zone(&self, tz: TimeZone) {
        *self.tz.lock().unwrap_or_else(PoisonError::into_inner) = Some(tz);
    }

    fn timestamp(&self) -> String {
        // N.B. `Zoned::now()` would consult the system time zone, which can
        // log. That would recurse right back into this logger.
        let ts = jiff::Timestamp::now();
        let tz = self.tz.lock().unwrap_or_else(PoisonError::into_inner);
        match *tz {
            None => ts.to_string(),
            Some(ref tz) => ts.to_zoned(tz.clone()).to_string(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let theme = Theme::stderr();
        let now = theme.highlight(self.timestamp());
        let level = theme.level(record.level());
        let target = record.module_path().unwrap_or(record.target());
        match record.line() {
            Some(line) => {
                eprintln!("{now}|{level}|{target}:{line}: {}", record.args())
            }
            None => eprintln!("{now}|{level}|{target}: {}", record.args()),
        }
    }

    fn flush(&self) {}
}
