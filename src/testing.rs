//! Test-only log capture.
//!
//! A single process-wide logger records every message together with the
//! thread that emitted it, so tests running in parallel only see their own.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = (thread::current().id(), record.args().to_string());
        self.records.lock().unwrap().push(entry);
    }

    fn flush(&self) {}
}

/// Run `f` and return the warning-or-worse messages it logged.
pub(crate) fn capture_logs<F: FnOnce()>(f: F) -> Vec<String> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Warn);
    });

    let id = thread::current().id();
    LOGGER.records.lock().unwrap().retain(|(owner, _)| *owner != id);

    f();

    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(owner, _)| *owner == id)
        .map(|(_, message)| message.clone())
        .collect()
}
