//! Level gates decide whether a logging call produces a record at all.

use std::sync::Arc;

use log::Level;

use crate::{Error, StaticCowStr};

/// A named logger that owns the level configuration.
///
/// [`StructuredLogger`](crate::StructuredLogger) asks its gate on every call whether the
/// level is enabled, and never caches the answer, so runtime changes to the level
/// configuration take effect immediately. Implementations must keep
/// [`enabled`](Gate::enabled) cheap and free of side effects.
pub trait Gate: Send + Sync {
    /// Returns `true` if records at `level` should be emitted.
    fn enabled(&self, level: Level) -> bool;

    /// Returns the name reported in the `parentLoggerName` field.
    fn name(&self) -> &str;
}

impl<G: Gate + ?Sized> Gate for Arc<G> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<G: Gate + ?Sized> Gate for Box<G> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A gate backed by the global [`log`] logger and a log target.
///
/// A level is enabled if it passes [`log::max_level`] and the installed logger accepts
/// metadata with this target and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: StaticCowStr,
}

impl Target {
    /// Creates a gate for the given log target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty.
    pub fn new(name: impl Into<StaticCowStr>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgument("target name cannot be empty"));
        }
        Ok(Self { name })
    }
}

impl Gate for Target {
    fn enabled(&self, level: Level) -> bool {
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(&self.name)
                    .build(),
            )
    }

    fn name(&self) -> &str {
        &self.name
    }
}
