//! The structured record handed over to a sink.

use std::borrow::Cow;

use serde::ser::SerializeMap;

use crate::{ContextCarrier, ContextValue, carrier::ContextEntries};

/// Field holding the message passed to the logging call.
pub const MESSAGE_KEY: &str = "message";
/// Field holding the name of the gate logger the record was emitted through.
pub const PARENT_LOGGER_NAME_KEY: &str = "parentLoggerName";

/// A fully assembled log record: the message, the name of the originating logger and
/// every context field, ordered by key.
///
/// A record is built from scratch for each enabled logging call and is only borrowed by
/// the sink.
///
/// # Reserved keys
///
/// Context fields are merged *after* [`MESSAGE_KEY`] and [`PARENT_LOGGER_NAME_KEY`], so a
/// context field named `message` or `parentLoggerName` silently replaces the value
/// supplied by the logger. Avoid these names in
/// [`with_context`](crate::StructuredLogger::with_context) unless that is what you want.
#[derive(Debug, Clone)]
pub struct StructuredRecord {
    origin: String,
    fields: ContextEntries,
}

impl StructuredRecord {
    pub(crate) fn assemble(
        message: &str,
        parent_logger_name: &str,
        context: &ContextCarrier,
    ) -> Self {
        let mut fields = ContextEntries::new();
        fields.insert(Cow::Borrowed(MESSAGE_KEY), ContextValue::from(message));
        fields.insert(
            Cow::Borrowed(PARENT_LOGGER_NAME_KEY),
            ContextValue::from(parent_logger_name),
        );
        fields.extend(
            context
                .as_map()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Self {
            origin: parent_logger_name.to_owned(),
            fields,
        }
    }

    /// Returns the name of the gate logger the record was emitted through.
    ///
    /// Unlike the `parentLoggerName` field this is never replaced by context fields.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the `message` field.
    ///
    /// This is the logged message unless a context field overrode it.
    #[must_use]
    pub fn message(&self) -> Option<&ContextValue> {
        self.get(MESSAGE_KEY)
    }

    #[must_use]
    pub fn parent_logger_name(&self) -> Option<&ContextValue> {
        self.get(PARENT_LOGGER_NAME_KEY)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.fields.get(key)
    }

    /// Iterates over all fields in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.fields.iter().map(|(key, value)| (key.as_ref(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl serde::Serialize for StructuredRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl log::kv::Source for StructuredRecord {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> Result<(), log::kv::Error> {
        for (key, value) in &self.fields {
            visitor.visit_pair(log::kv::Key::from_str(key), value.as_log_value())?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.fields.len()
    }
}
