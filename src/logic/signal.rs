//! Tri-state logic values carried by pins.
//!
//! [`Signal::Unknown`] is both the power-on value and the value of a pin
//! whose source is missing. The combinators below short-circuit the way a
//! hardware gate would: a determining input wins over an unknown one.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Value held by a pin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// Logic high.
    One,
    /// Logic low.
    Zero,
    /// Undetermined.
    #[default]
    Unknown,
}

impl Signal {
    /// Converts a boolean into a determined signal.
    ///
    /// # Examples
    /// ```
    /// use sparty::logic::Signal;
    /// assert_eq!(Signal::from_bool(true), Signal::One);
    /// assert_eq!(Signal::from_bool(false), Signal::Zero);
    /// ```
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::One
        } else {
            Self::Zero
        }
    }

    /// Returns `true` only for [`Signal::One`].
    #[must_use]
    pub const fn is_one(self) -> bool {
        matches!(self, Self::One)
    }

    /// Returns `true` for [`Signal::One`] and [`Signal::Zero`].
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Logical conjunction. `Zero` dominates `Unknown`.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Zero, _) | (_, Self::Zero) => Self::Zero,
            (Self::One, Self::One) => Self::One,
            _ => Self::Unknown,
        }
    }

    /// Logical disjunction. `One` dominates `Unknown`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::One, _) | (_, Self::One) => Self::One,
            (Self::Zero, Self::Zero) => Self::Zero,
            _ => Self::Unknown,
        }
    }

    /// Exclusive or. Any unknown input yields `Unknown`.
    #[must_use]
    pub const fn xor(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::One, Self::Zero) | (Self::Zero, Self::One) => Self::One,
            _ => Self::Zero,
        }
    }

    /// Logical negation; `Unknown` stays `Unknown`.
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::One => Self::Zero,
            Self::Zero => Self::One,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::One => "1",
            Self::Zero => "0",
            Self::Unknown => "?",
        };
        f.write_str(symbol)
    }
}
