use std::{fmt, sync::Arc};

/// An opaque value attached to a structured log record.
///
/// The value is never inspected by the logger itself. It is only rendered when a
/// [`Sink`](crate::Sink) asks for it, so attaching an expensive nested structure to a
/// logger costs nothing as long as the level it is logged at stays disabled.
///
/// Cloning a value is cheap: all clones share the same underlying data.
#[derive(Clone)]
pub struct ContextValue(Arc<ContextValueInner>);

enum ContextValueInner {
    Null,
    String(String),
    Debug(Box<dyn fmt::Debug + Send + Sync + 'static>),
    Display(Box<dyn fmt::Display + Send + Sync + 'static>),
    Error(Box<dyn std::error::Error + Send + Sync + 'static>),
    Serde(Box<dyn erased_serde::Serialize + Send + Sync + 'static>),
}

impl From<ContextValueInner> for ContextValue {
    fn from(inner: ContextValueInner) -> Self {
        Self(Arc::new(inner))
    }
}

impl ContextValue {
    #[must_use]
    pub fn null() -> Self {
        ContextValueInner::Null.into()
    }

    /// Creates a value that is rendered with its [`serde::Serialize`] implementation.
    #[must_use]
    pub fn serde<S>(value: S) -> Self
    where
        S: serde::Serialize + Send + Sync + 'static,
    {
        let value = Box::new(value);
        ContextValueInner::Serde(value).into()
    }

    #[must_use]
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        let value = Box::new(value);
        ContextValueInner::Display(value).into()
    }

    #[must_use]
    pub fn debug<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        let value = Box::new(value);
        ContextValueInner::Debug(value).into()
    }

    #[must_use]
    pub fn error<T>(value: T) -> Self
    where
        T: std::error::Error + Send + Sync + 'static,
    {
        let value = Box::new(value);
        ContextValueInner::Error(value).into()
    }

    /// Returns `true` if both values point to the same underlying data.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn as_log_value(&self) -> log::kv::Value<'_> {
        match &*self.0 {
            ContextValueInner::Null => log::kv::Value::null(),
            ContextValueInner::String(s) => log::kv::Value::from(&**s),
            ContextValueInner::Display(value) => log::kv::Value::from_dyn_display(&**value),
            ContextValueInner::Debug(value) => log::kv::Value::from_dyn_debug(&**value),
            ContextValueInner::Error(value) => log::kv::Value::from_dyn_error(&**value),
            ContextValueInner::Serde(value) => log::kv::Value::from_serde(value),
        }
    }
}

impl serde::Serialize for ContextValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &*self.0 {
            ContextValueInner::Null => serializer.serialize_unit(),
            ContextValueInner::String(s) => serializer.serialize_str(s),
            ContextValueInner::Display(value) => serializer.collect_str(value),
            ContextValueInner::Debug(value) => serializer.collect_str(&format_args!("{value:?}")),
            ContextValueInner::Error(value) => serializer.collect_str(value),
            ContextValueInner::Serde(value) => serde::Serialize::serialize(value, serializer),
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_log_value(), f)
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ContextValueInner::Null => f.write_str("Null"),
            ContextValueInner::String(s) => f.debug_tuple("String").field(s).finish(),
            ContextValueInner::Display(value) => {
                f.debug_tuple("Display").field(&format_args!("{value}")).finish()
            }
            ContextValueInner::Debug(value) => f.debug_tuple("Debug").field(value).finish(),
            ContextValueInner::Error(value) => f.debug_tuple("Error").field(value).finish(),
            // Rendering a serde value here would defeat the point of keeping it lazy.
            ContextValueInner::Serde(_) => f.write_str("Serde(..)"),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValueInner::String(value.to_owned()).into()
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValueInner::String(value).into()
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ContextValue {
                fn from(value: $ty) -> Self {
                    Self::serde(value)
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);
