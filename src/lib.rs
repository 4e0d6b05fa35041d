//! # Overview
//!
#![doc = include_utils::include_md!("README.md:description")]
//!
//! Log processing pipelines work best when every log line is a single structured object
//! with well-known fields instead of free text. This library helps with that by:
//!
//! - Accumulating structured fields on an immutable logger with
//!   [`StructuredLogger::with_context`].
//! - Emitting each logging call as one [`StructuredRecord`] with the message, the name of
//!   the originating logger and all context fields, ordered by key.
//! - Respecting the level configuration of an existing logger and doing no work at all
//!   for disabled levels.
//!
//! The library does not render or transport records itself. The level configuration
//! comes from a [`Gate`], usually a [`Target`] of the standard [`log`] facade, and the
//! records are handed to a [`Sink`]: the default [`LogSink`] forwards them to whatever
//! [`Log`](log::Log) implementation is installed, for example [`env_logger`] or
//! [`structured-logger`], while [`JsonSink`] writes JSON lines to any writer.
//!
//! ## Basic example
//!
#![doc = include_utils::include_md!("README.md:basic_example")]
//!
//! ## Reserved keys
//!
//! Context fields are merged after the `message` and `parentLoggerName` fields, so a
//! context field with one of these names replaces the value set by the logger:
//!
//! ```
//! # use std::sync::Arc;
//! # use log::Level;
//! # use structured_facade::{Gate, JsonSink, StructuredLogger};
//! # struct AllLevels;
//! # impl Gate for AllLevels {
//! #     fn enabled(&self, _level: Level) -> bool { true }
//! #     fn name(&self) -> &str { "app" }
//! # }
//! let sink = Arc::new(JsonSink::new(Vec::new()));
//! StructuredLogger::with_sink(Some(AllLevels), sink.clone())?
//!     .with_context("message", "from context")
//!     .info("from call")?;
//! // The record contains `"message":"from context"`.
//! # Ok::<(), structured_facade::SinkError>(())
//! ```
//!
//! [`env_logger`]: https://docs.rs/env_logger/latest/env_logger
//! [`structured-logger`]: https://docs.rs/structured-logger/latest/structured_logger

use std::borrow::Cow;

pub use self::{
    carrier::ContextCarrier,
    error::Error,
    gate::{Gate, Target},
    logger::StructuredLogger,
    record::{MESSAGE_KEY, PARENT_LOGGER_NAME_KEY, StructuredRecord},
    sink::{DEFAULT_SINK_TARGET, JsonSink, LogSink, Sink, SinkError},
    value::ContextValue,
};

pub mod carrier;
mod error;
pub mod gate;
mod logger;
mod record;
pub mod sink;
mod value;

type StaticCowStr = Cow<'static, str>;
