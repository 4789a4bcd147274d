//! Opt-in timings and an event log for diagnosing the app loop.
//!
//! `--perf` turns on scope timings. `--render-debug-log PATH` (or
//! `TASKDECK_DEBUG_LOG`) opens a file recording messages, requests and
//! frames, each stamped with its offset from when the log was opened.
//! Timings go to that file when it is open and to stderr otherwise.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Environment variable naming a debug log file when no flag is given.
pub const DEBUG_LOG_ENV: &str = "TASKDECK_DEBUG_LOG";

static TIMINGS: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: Mutex<Option<EventLog>> = Mutex::new(None);

struct EventLog {
    opened: Instant,
    out: BufWriter<File>,
}

impl EventLog {
    fn open(path: &Path) -> io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "taskdeck debug log start")?;
        out.flush()?;
        Ok(Self {
            opened: Instant::now(),
            out,
        })
    }

    fn record(&mut self, name: &str, detail: &str) -> io::Result<()> {
        let offset_ms = self.opened.elapsed().as_secs_f64() * 1000.0;
        writeln!(self.out, "[{offset_ms:>10.3} ms] {name}: {detail}")?;
        self.out.flush()
    }
}

fn event_log() -> MutexGuard<'static, Option<EventLog>> {
    EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Times the enclosing block when timings are on; reports on drop.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !timings_enabled() {
            return;
        }
        let detail = format!("{:.2} ms", self.start.elapsed().as_secs_f64() * 1000.0);
        match event_log().as_mut() {
            Some(log) => {
                let _ = log.record(self.name, &detail);
            }
            None => eprintln!("[perf] {}: {detail}", self.name),
        }
    }
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn set_timings(enabled: bool) {
    TIMINGS.store(enabled, Ordering::Relaxed);
}

pub fn timings_enabled() -> bool {
    TIMINGS.load(Ordering::Relaxed)
}

/// Open the event log at `path`, replacing any open one, or close it when
/// `None`.
///
/// # Errors
/// Fails if the file cannot be created or its header written; the previous
/// log stays open in that case.
pub fn set_debug_log_path(path: Option<&Path>) -> io::Result<()> {
    let log = path.map(EventLog::open).transpose()?;
    *event_log() = log;
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    event_log().is_some()
}

/// Append `name: detail` to the event log, if one is open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    if let Some(log) = event_log().as_mut() {
        let _ = log.record(name, detail.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    // One test, since the log and the timing flag are process-wide.
    #[test]
    fn test_event_log_records_events_and_timings() {
        let temp_file = NamedTempFile::new().unwrap();
        set_debug_log_path(Some(temp_file.path())).unwrap();
        assert!(is_debug_log_enabled());

        log_event("request.dispatch", "id=#1 endpoint=analyze");
        set_timings(true);
        assert!(timings_enabled());
        drop(scope("frame.draw"));
        set_timings(false);
        drop(scope("frame.skipped"));

        set_debug_log_path(None).unwrap();
        assert!(!is_debug_log_enabled());
        log_event("after.close", "dropped");

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("taskdeck debug log start\n"));
        assert!(content.contains("] request.dispatch: id=#1 endpoint=analyze"));
        assert!(content.contains("] frame.draw: "));
        assert!(!content.contains("frame.skipped"));
        assert!(!content.contains("after.close"));
    }
}
