use std::{fmt, sync::Arc};

use log::Level;

use crate::{
    ContextCarrier, ContextValue, Error, Gate, LogSink, Sink, SinkError, StaticCowStr,
    StructuredRecord, Target,
};

/// A logger that emits every call as a single structured record.
///
/// `StructuredLogger` combines three things:
///
/// - a [`Gate`], the named logger that decides which levels are enabled and whose name
///   ends up in the `parentLoggerName` field;
/// - a [`Sink`], shared by all loggers created from the same root, that renders the
///   records;
/// - a [`ContextCarrier`] with the fields accumulated by [`with_context`](Self::with_context).
///
/// The logger is immutable. `with_context` returns a new logger and leaves `self` as it
/// was, so a logger can be forked freely and shared between threads.
///
/// When a level is disabled the call returns right after asking the gate: no record is
/// assembled and no context value is rendered.
///
/// # Reserved keys
///
/// Context fields named `message` or `parentLoggerName` replace the values the logger
/// puts into the record. See [`StructuredRecord`] for details.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use structured_facade::{JsonSink, StructuredLogger, Target};
///
/// let gate = Target::new("svc.orders")?;
/// let logger = StructuredLogger::with_sink(Some(gate), Arc::new(JsonSink::stdout()))?
///     .with_context("request_id", "req-123");
///
/// let attempt = logger.with_context("attempt", 2);
/// attempt.info("Retrying request")?;
/// # Ok::<(), structured_facade::SinkError>(())
/// ```
#[derive(Clone)]
pub struct StructuredLogger {
    gate: Arc<dyn Gate>,
    sink: Arc<dyn Sink>,
    context: ContextCarrier,
}

impl StructuredLogger {
    /// Creates a logger that forwards its records to the global [`log`] logger through
    /// a [`LogSink`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `gate` is `None`.
    pub fn new<G>(gate: Option<G>) -> Result<Self, Error>
    where
        G: Gate + 'static,
    {
        Self::with_sink(gate, Arc::new(LogSink::new()))
    }

    /// Creates a logger that sends its records to the given sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `gate` is `None`.
    pub fn with_sink<G>(gate: Option<G>, sink: Arc<dyn Sink>) -> Result<Self, Error>
    where
        G: Gate + 'static,
    {
        let gate = gate.ok_or(Error::InvalidArgument("gate logger cannot be absent"))?;
        Ok(Self {
            gate: Arc::new(gate),
            sink,
            context: ContextCarrier::empty(),
        })
    }

    /// Shorthand for a [`Target`] gate with the default [`LogSink`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `target` is empty.
    pub fn for_target(target: impl Into<StaticCowStr>) -> Result<Self, Error> {
        Self::new(Some(Target::new(target)?))
    }

    /// Returns a new logger with `key` set to `value` in its context.
    ///
    /// The new logger shares the gate and the sink with `self`. A previous value for
    /// `key` is replaced in the new logger only.
    #[must_use]
    pub fn with_context(
        &self,
        key: impl Into<StaticCowStr>,
        value: impl Into<ContextValue>,
    ) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
            sink: Arc::clone(&self.sink),
            context: self.context.fork(key, value),
        }
    }

    #[must_use]
    pub const fn context(&self) -> &ContextCarrier {
        &self.context
    }

    #[must_use]
    pub fn gate_name(&self) -> &str {
        self.gate.name()
    }

    /// Returns `true` if the gate currently enables `level`.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.gate.enabled(level)
    }

    /// Logs `message` at the given level.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink, unchanged. A disabled level never fails.
    pub fn log(&self, level: Level, message: &str) -> Result<(), SinkError> {
        if !self.gate.enabled(level) {
            return Ok(());
        }

        let record = StructuredRecord::assemble(message, self.gate.name(), &self.context);
        self.sink.log(level, &record)
    }

    /// Logs `message` at the [`Level::Trace`] level.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink, unchanged.
    pub fn trace(&self, message: &str) -> Result<(), SinkError> {
        self.log(Level::Trace, message)
    }

    /// Logs `message` at the [`Level::Debug`] level.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink, unchanged.
    pub fn debug(&self, message: &str) -> Result<(), SinkError> {
        self.log(Level::Debug, message)
    }

    /// Logs `message` at the [`Level::Info`] level.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink, unchanged.
    pub fn info(&self, message: &str) -> Result<(), SinkError> {
        self.log(Level::Info, message)
    }

    /// Logs `message` at the [`Level::Warn`] level.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink, unchanged.
    pub fn warn(&self, message: &str) -> Result<(), SinkError> {
        self.log(Level::Warn, message)
    }

    /// Logs `message` at the [`Level::Error`] level.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the sink, unchanged.
    pub fn error(&self, message: &str) -> Result<(), SinkError> {
        self.log(Level::Error, message)
    }
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("gate", &self.gate.name())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
