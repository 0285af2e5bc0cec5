//! Product quick actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quick stock action on a single product
///
/// Wire form: `{ "action": "increment" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ProductAction {
    /// quantity + 1
    Increment,
    /// quantity - 1, saturating at 0
    Decrement,
    /// Read-only, returns the product unchanged
    View,
}

impl ProductAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::View => "view",
        }
    }

    /// Whether applying this action writes to the catalog
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::View)
    }
}

impl fmt::Display for ProductAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action name that matches no [`ProductAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for ProductAction {
    type Err = UnknownAction;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "increment" => Ok(Self::Increment),
            "decrement" => Ok(Self::Decrement),
            "view" => Ok(Self::View),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}
