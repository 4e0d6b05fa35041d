/// Errors originated by this crate.
///
/// Failures reported by a [`Sink`](crate::Sink) are not wrapped into this type; they are
/// returned to the caller as the [`SinkError`](crate::SinkError) the sink produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
