use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A named capability of the application ("articles", "comments", "tasks").
///
/// Features are opaque, case-sensitive names. New features appear in the
/// policy table and the ownership registry without any change to the
/// authorization core itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(String);

impl Feature {
    /// Create a feature name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The feature name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Feature {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Feature {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
