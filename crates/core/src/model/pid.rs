use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Reserved ids that mean "no process is running".
const SENTINELS: [&str; 3] = ["idle", "0", "-1"];

/// An opaque process identifier.
///
/// Wraps `Arc<str>` so the same id can sit in intervals, lanes and render
/// segments without reallocating on every clone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(Arc<str>);

impl ProcessId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id denotes the absence of a running process.
    pub fn is_sentinel(&self) -> bool {
        is_sentinel_str(&self.0)
    }

    /// Coerce a loosely-typed JSON pid into an id.
    ///
    /// Strings are taken as-is and numbers use their decimal text. `null`,
    /// booleans, arrays and objects have no usable id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s)),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Some(Self::new(i.to_string())),
                // `f64` Display drops a zero fraction: 3.0 -> "3".
                (None, Some(f)) => Some(Self::new(f.to_string())),
                (None, None) => Some(Self::new(n.to_string())),
            },
            _ => None,
        }
    }

    /// Like [`ProcessId::from_value`], but also rejects sentinel ids.
    pub fn scheduled(value: &Value) -> Option<Self> {
        Self::from_value(value).filter(|pid| !pid.is_sentinel())
    }
}

/// Sentinel check on raw text: empty, `idle` (any case), `0` or `-1`.
pub fn is_sentinel_str(id: &str) -> bool {
    let id = id.trim();
    id.is_empty() || SENTINELS.iter().any(|s| id.eq_ignore_ascii_case(s))
}

impl std::ops::Deref for ProcessId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ProcessId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for ProcessId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl From<&str> for ProcessId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ProcessId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for ProcessId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProcessId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
