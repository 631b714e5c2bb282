//! Presence-typed result wrapper.
//!
//! [`Optional`] distinguishes "no value" from any specific value, including values that
//! look absent themselves (an `Optional<Option<T>>` holding `None` is still present).
//! Aggregating terminal operators (`reduce`, `min`, `max`, `find_first`) return it.

use crate::error::{Result, StreamError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Optional<T>(Option<T>);

impl<T> Optional<T> {
    /// The unique absent value.
    pub const EMPTY: Self = Optional(None);

    pub fn of(value: T) -> Self {
        Optional(Some(value))
    }

    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the contained value, failing with [`StreamError::AbsentValue`] when absent.
    pub fn get(&self) -> Result<&T> {
        self.0.as_ref().ok_or(StreamError::AbsentValue)
    }

    /// Take the contained value, failing with [`StreamError::AbsentValue`] when absent.
    pub fn into_value(self) -> Result<T> {
        self.0.ok_or(StreamError::AbsentValue)
    }

    pub fn or_else(self, other: T) -> T {
        self.0.unwrap_or(other)
    }

    pub fn or_else_get(self, f: impl FnOnce() -> T) -> T {
        self.0.unwrap_or_else(f)
    }

    /// Return the value, or the caller's error when absent.
    pub fn or_raise<E>(self, err: E) -> std::result::Result<T, E> {
        self.0.ok_or(err)
    }

    pub fn if_present(&self, consumer: impl FnOnce(&T)) {
        if let Some(v) = &self.0 {
            consumer(v);
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        Optional(self.0.map(f))
    }

    pub fn as_option(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Optional(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.0
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "Optional[{v}]"),
            None => write!(f, "EMPTY"),
        }
    }
}
