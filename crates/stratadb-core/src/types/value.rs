//! Typed scalar values.
//!
//! This module provides the [`Value`] enum, which represents every scalar
//! a StrataDB tuple can carry: 64-bit integers, 64-bit floats, and
//! fixed-width character strings.
//!
//! # Example
//!
//! ```
//! use stratadb_core::Value;
//!
//! let count: Value = 7i64.into();
//! let price: Value = 19.99f64.into();
//! let label: Value = "widget".into();
//!
//! assert_eq!(count.as_int(), Some(7));
//! assert_eq!(price.as_float(), Some(19.99));
//! assert_eq!(label.as_str(), Some("widget"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A typed scalar value.
///
/// Character values carry their declared width alongside the data: a
/// `CHAR(8)` literal and a `CHAR(4)` literal with the same text are
/// distinct values at the type level, and the executor pads or truncates
/// against the declared width, not the data length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// Fixed-width character string.
    Char {
        /// The string data. Always at most `width` characters.
        data: String,
        /// The declared column width.
        width: usize,
    },
}

impl Value {
    /// Creates a character value, validating against the declared width.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CharWidthExceeded`] if `data` is longer than
    /// `width` characters, and [`CoreError::ZeroCharWidth`] if `width`
    /// is zero.
    pub fn char(data: impl Into<String>, width: usize) -> CoreResult<Self> {
        if width == 0 {
            return Err(CoreError::ZeroCharWidth);
        }
        let data = data.into();
        let len = data.chars().count();
        if len > width {
            return Err(CoreError::CharWidthExceeded { width, len });
        }
        Ok(Self::Char { data, width })
    }

    /// Returns the integer value, if this is an `Int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float value, if this is a `Float`.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string data, if this is a `Char`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Char { data, .. } => Some(data.as_str()),
            _ => None,
        }
    }

    /// Returns true if this value is numeric (`Int` or `Float`).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        // A bare literal's declared width is its own length.
        let width = v.chars().count().max(1);
        Self::Char { data: v.to_string(), width }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        let width = v.chars().count().max(1);
        Self::Char { data: v, width }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char { data, .. } => write!(f, "'{data}'"),
        }
    }
}
