//! Immutable storage for the structured fields accumulated by a logger.

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{ContextValue, StaticCowStr};

pub(crate) type ContextEntries = BTreeMap<StaticCowStr, ContextValue>;

/// An immutable, ordered set of structured fields.
///
/// A carrier is never modified once it has been built. [`ContextCarrier::fork`] copies the
/// existing entries into a new carrier and adds one more field, so every logger that
/// holds on to an older carrier keeps seeing exactly the fields it was created with.
///
/// Entries are kept sorted by key. Two carriers with the same fields iterate in the same
/// order no matter in which order the fields were added.
///
/// # Examples
///
/// ```
/// use structured_facade::ContextCarrier;
///
/// let base = ContextCarrier::empty().fork("request_id", "req-123");
/// let forked = base.fork("attempt", 2);
///
/// assert_eq!(base.len(), 1);
/// let keys: Vec<_> = forked.entries().map(|(key, _)| key).collect();
/// assert_eq!(keys, ["attempt", "request_id"]);
/// ```
#[derive(Clone, Default)]
pub struct ContextCarrier(Arc<ContextEntries>);

impl ContextCarrier {
    /// Creates a carrier without any fields.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new carrier with all fields of `self` and `key` set to `value`.
    ///
    /// If `key` is already present its value is replaced in the new carrier only.
    /// The value is shared with the caller rather than copied.
    #[must_use]
    pub fn fork(&self, key: impl Into<StaticCowStr>, value: impl Into<ContextValue>) -> Self {
        let mut entries = ContextEntries::clone(&self.0);
        entries.insert(key.into(), value.into());
        Self(Arc::new(entries))
    }

    /// Iterates over the fields in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.0.iter().map(|(key, value)| (key.as_ref(), value))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_map(&self) -> &ContextEntries {
        &self.0
    }
}

impl fmt::Debug for ContextCarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
