use thiserror::Error;

/// Bytes that cannot belong to any valid frame: unknown command, a field
/// requested for a command that does not carry it, or a checksum mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("protocol error")]
pub struct ProtocolError;

/// Result of every extraction, validation and transcoding step.
///
/// `Incomplete` means the input is a valid prefix of a larger frame and the
/// caller should wait for more bytes. `Corrupt` is terminal for the bytes at
/// hand. The two must never be conflated since the recovery differs.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    Value(T),
    Incomplete,
    Corrupt(ProtocolError),
}

impl<T> Outcome<T> {
    pub const fn corrupt() -> Self {
        Outcome::Corrupt(ProtocolError)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Outcome::Incomplete)
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Outcome::Corrupt(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(value) => Outcome::Value(f(value)),
            Outcome::Incomplete => Outcome::Incomplete,
            Outcome::Corrupt(err) => Outcome::Corrupt(err),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Value(value) => f(value),
            Outcome::Incomplete => Outcome::Incomplete,
            Outcome::Corrupt(err) => Outcome::Corrupt(err),
        }
    }

    /// Converts into the `Ok(Some)` / `Ok(None)` / `Err` shape used by
    /// stream decoders.
    pub fn into_result(self) -> Result<Option<T>, ProtocolError> {
        match self {
            Outcome::Value(value) => Ok(Some(value)),
            Outcome::Incomplete => Ok(None),
            Outcome::Corrupt(err) => Err(err),
        }
    }
}

/// Unwraps a `Value`, returning early with `Incomplete` or `Corrupt`.
macro_rules! value {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Value(value) => value,
            $crate::Outcome::Incomplete => return $crate::Outcome::Incomplete,
            $crate::Outcome::Corrupt(err) => return $crate::Outcome::Corrupt(err),
        }
    };
}

pub(crate) use value;
