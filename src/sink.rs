//! Sinks render and transport assembled records.

use std::{
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use log::Level;

use crate::{StaticCowStr, StructuredRecord};

/// Error returned by a [`Sink`].
///
/// It is handed back to the caller of the logging method unchanged.
pub type SinkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives fully assembled records from enabled logging calls.
///
/// A single sink is usually shared by many [`StructuredLogger`](crate::StructuredLogger)
/// instances, so implementations have to be thread safe.
pub trait Sink: Send + Sync {
    /// Emits `record` at the given `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be rendered or written.
    fn log(&self, level: Level, record: &StructuredRecord) -> Result<(), SinkError>;
}

/// Default `loggerName` written by [`JsonSink`].
pub const DEFAULT_SINK_TARGET: &str = "structured_facade";

/// A sink that forwards records to the logger installed in the [`log`] crate.
///
/// Every record becomes one [`log::Record`] whose key-value pairs are the record fields
/// and whose message is the `message` field. The record target is the name of the gate
/// logger, so per-target filters of the installed logger see the same target the gate
/// was asked about. [`LogSink::with_target`] routes all records to one fixed target
/// instead.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    target: Option<StaticCowStr>,
}

impl LogSink {
    #[must_use]
    pub const fn new() -> Self {
        Self { target: None }
    }

    /// Forwards all records under `target` instead of the gate logger name.
    ///
    /// The installed logger must enable this target, otherwise records allowed by the
    /// gate are dropped.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<StaticCowStr>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Returns the fixed target set by [`LogSink::with_target`], if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl Sink for LogSink {
    fn log(&self, level: Level, record: &StructuredRecord) -> Result<(), SinkError> {
        let message = record
            .message()
            .map(ToString::to_string)
            .unwrap_or_default();
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target(self.target().unwrap_or_else(|| record.origin()))
                .key_values(record)
                .build(),
        );
        Ok(())
    }
}

/// A sink that writes every record as one compact JSON line.
///
/// The output has the following layout, with the record nested under `message`:
///
/// ```json
/// {"level":"INFO","loggerName":"structured_facade","message":{"message":"...","parentLoggerName":"..."}}
/// ```
#[derive(Debug)]
pub struct JsonSink<W> {
    name: StaticCowStr,
    writer: Mutex<W>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLine<'a> {
    level: &'a str,
    logger_name: &'a str,
    message: &'a StructuredRecord,
}

impl<W> JsonSink<W>
where
    W: Write + Send,
{
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            name: StaticCowStr::Borrowed(DEFAULT_SINK_TARGET),
            writer: Mutex::new(writer),
        }
    }

    /// Sets the value of the `loggerName` field.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<StaticCowStr>) -> Self {
        self.name = name.into();
        self
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl JsonSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> Sink for JsonSink<W>
where
    W: Write + Send,
{
    fn log(&self, level: Level, record: &StructuredRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(&JsonLine {
            level: level.as_str(),
            logger_name: &self.name,
            message: record,
        })?;
        line.push(b'\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::from("json sink writer is poisoned"))?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ContextCarrier, ContextValue};

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader has gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    fn record(context: &ContextCarrier) -> StructuredRecord {
        StructuredRecord::assemble("message", "svc.orders", context)
    }

    #[test]
    fn test_json_sink_layout() {
        let sink = JsonSink::new(Vec::new()).with_name("structured");
        let context = ContextCarrier::empty().fork("answer", 42);

        sink.log(Level::Warn, &record(&context)).unwrap();
        sink.log(Level::Info, &record(&ContextCarrier::empty())).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            concat!(
                r#"{"level":"WARN","loggerName":"structured","message":{"answer":42,"message":"message","parentLoggerName":"svc.orders"}}"#,
                "\n",
                r#"{"level":"INFO","loggerName":"structured","message":{"message":"message","parentLoggerName":"svc.orders"}}"#,
                "\n",
            )
        );
    }

    #[test]
    fn test_json_sink_write_error() {
        let sink = JsonSink::new(BrokenWriter);

        let error = sink
            .log(Level::Info, &record(&ContextCarrier::empty()))
            .unwrap_err();
        let error = error.downcast::<io::Error>().unwrap();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_json_sink_serialize_error() {
        let sink = JsonSink::new(Vec::new());
        let context =
            ContextCarrier::empty().fork("broken", ContextValue::serde(Unserializable));

        let error = sink.log(Level::Error, &record(&context)).unwrap_err();
        assert!(error.downcast_ref::<serde_json::Error>().is_some());
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_log_sink_target() {
        assert_eq!(LogSink::default().target(), None);
        assert_eq!(LogSink::new().with_target("audit").target(), Some("audit"));
    }
}
