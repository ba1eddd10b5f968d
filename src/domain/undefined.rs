//! Tri-state values for fields Discord may leave out of a payload.
//!
//! A plain `Option<T>` cannot tell "Discord sent `null`" apart from "Discord did
//! not send this field at all". Partial payloads (message updates, reaction
//! events) routinely omit fields whose value did not change or which Discord
//! simply does not know at that point, so the model keeps the two apart:
//!
//! - [`UndefinedOr<T>`] is a value or the [`UndefinedOr::Undefined`] sentinel.
//! - [`UndefinedNoneOr<T>`] (`UndefinedOr<Option<T>>`) is present, null, or unset.
//!
//! Payload structs pair these with `#[serde(default)]`, so a missing key becomes
//! `Undefined` and an explicit `null` becomes `Defined(None)`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may not have been provided by Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndefinedOr<T> {
    /// The source did not provide this value.
    Undefined,
    /// The source provided this value.
    Defined(T),
}

/// A value that may be present, explicitly null, or not provided.
pub type UndefinedNoneOr<T> = UndefinedOr<Option<T>>;

impl<T> UndefinedOr<T> {
    /// Returns true if the value was not provided.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if the value was provided.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Borrows the inner value.
    #[must_use]
    pub fn as_ref(&self) -> UndefinedOr<&T> {
        match self {
            Self::Undefined => UndefinedOr::Undefined,
            Self::Defined(value) => UndefinedOr::Defined(value),
        }
    }

    /// Mutably borrows the inner value.
    pub fn as_mut(&mut self) -> UndefinedOr<&mut T> {
        match self {
            Self::Undefined => UndefinedOr::Undefined,
            Self::Defined(value) => UndefinedOr::Defined(value),
        }
    }

    /// Maps a defined value, keeping `Undefined` as is.
    pub fn map<U, F>(self, f: F) -> UndefinedOr<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Undefined => UndefinedOr::Undefined,
            Self::Defined(value) => UndefinedOr::Defined(f(value)),
        }
    }

    /// Chains a computation that may itself be undefined.
    pub fn and_then<U, F>(self, f: F) -> UndefinedOr<U>
    where
        F: FnOnce(T) -> UndefinedOr<U>,
    {
        match self {
            Self::Undefined => UndefinedOr::Undefined,
            Self::Defined(value) => f(value),
        }
    }

    /// Converts into an `Option`, mapping `Undefined` to `None`.
    #[must_use]
    pub fn defined(self) -> Option<T> {
        match self {
            Self::Undefined => None,
            Self::Defined(value) => Some(value),
        }
    }

    /// Returns the defined value or `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Undefined => default,
            Self::Defined(value) => value,
        }
    }

    /// Returns the defined value or computes one.
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Undefined => f(),
            Self::Defined(value) => value,
        }
    }

    /// Returns the defined value or `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// Returns `self` if defined, otherwise `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Undefined => other,
            defined @ Self::Defined(_) => defined,
        }
    }

    /// Takes the value out, leaving `Undefined` in its place.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<T: std::ops::Deref> UndefinedOr<T> {
    /// Borrows the dereferenced inner value.
    #[must_use]
    pub fn as_deref(&self) -> UndefinedOr<&T::Target> {
        match self {
            Self::Undefined => UndefinedOr::Undefined,
            Self::Defined(value) => UndefinedOr::Defined(&**value),
        }
    }
}

impl<T> UndefinedOr<Option<T>> {
    /// Returns true if the value was provided as an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Defined(None))
    }

    /// Collapses the tri-state into an `Option`.
    ///
    /// Unset and null both become `None`; only use this where the caller
    /// genuinely does not care which one it was.
    #[must_use]
    pub fn flatten(self) -> Option<T> {
        match self {
            Self::Defined(Some(value)) => Some(value),
            Self::Defined(None) | Self::Undefined => None,
        }
    }
}

impl<T> Default for UndefinedOr<T> {
    fn default() -> Self {
        Self::Undefined
    }
}

impl<T: fmt::Display> fmt::Display for UndefinedOr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("UNDEFINED"),
            Self::Defined(value) => value.fmt(f),
        }
    }
}

impl<T> From<T> for UndefinedOr<T> {
    fn from(value: T) -> Self {
        Self::Defined(value)
    }
}

impl<T: Serialize> Serialize for UndefinedOr<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Undefined => serializer.serialize_none(),
            Self::Defined(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for UndefinedOr<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Defined)
    }
}
