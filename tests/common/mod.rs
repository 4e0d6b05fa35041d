#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use log::{Level, LevelFilter, Record, kv::Key};
use structured_facade::{Gate, Sink, SinkError, StructuredLogger, StructuredRecord};

pub trait RecordExt {
    fn get_record(&self, key: &str) -> Option<serde_json::Value>;
}

impl RecordExt for Record<'_> {
    fn get_record(&self, key: &str) -> Option<serde_json::Value> {
        let key = Key::from_str(key);
        let val = self.key_values().get(key)?;
        serde_json::to_value(val).ok()
    }
}

/// Installs the `env_logger` built by `builder` and passes every record it accepts to
/// `check`.
pub fn check_logger_once<F>(mut builder: env_logger::Builder, check: F)
where
    F: Fn(&Record) -> std::io::Result<()> + Send + Sync + 'static,
{
    let logger = builder.format(move |_fmt, record| check(record)).build();
    let level_filter = logger.filter();
    log::set_boxed_logger(Box::new(logger)).unwrap();
    log::set_max_level(level_filter);
}

/// A gate with a switchable level filter that counts how often it was asked.
#[derive(Debug)]
pub struct MockGate {
    name: &'static str,
    filter: Mutex<LevelFilter>,
    queries: AtomicUsize,
}

impl MockGate {
    pub fn new(name: &'static str, filter: LevelFilter) -> Arc<Self> {
        Arc::new(Self {
            name,
            filter: Mutex::new(filter),
            queries: AtomicUsize::new(0),
        })
    }

    pub fn set_filter(&self, filter: LevelFilter) {
        *self.filter.lock().unwrap() = filter;
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Gate for MockGate {
    fn enabled(&self, level: Level) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        level <= *self.filter.lock().unwrap()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// A sink that keeps every record it receives as a JSON string.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::default()
    }

    pub fn raw(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<(Level, serde_json::Value)> {
        self.raw()
            .into_iter()
            .map(|(level, line)| (level, serde_json::from_str(&line).unwrap()))
            .collect()
    }
}

impl Sink for RecordingSink {
    fn log(&self, level: Level, record: &StructuredRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(record)?;
        self.records.lock().unwrap().push((level, line));
        Ok(())
    }
}

/// A sink that always fails.
#[derive(Debug, Default)]
pub struct FailingSink {
    calls: AtomicUsize,
}

impl FailingSink {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Sink for FailingSink {
    fn log(&self, _level: Level, _record: &StructuredRecord) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(std::io::Error::other("disk full").into())
    }
}

/// A context value that counts how many times it was serialized.
#[derive(Debug, Clone, Default)]
pub struct Tripwire(Arc<AtomicUsize>);

impl Tripwire {
    pub fn touched(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl serde::Serialize for Tripwire {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.fetch_add(1, Ordering::SeqCst);
        serializer.serialize_str("tripwire")
    }
}

pub fn logger_with(
    gate: &Arc<MockGate>,
    sink: &Arc<impl Sink + 'static>,
) -> StructuredLogger {
    StructuredLogger::with_sink(Some(Arc::clone(gate)), sink.clone()).unwrap()
}
