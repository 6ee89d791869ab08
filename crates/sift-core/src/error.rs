use crate::{
    codec::{DecodeError, EncodeError, RegistryError},
    config::ConfigError,
    extract::ResolveError,
    predicate::EvalError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error for hosts that drive several engine surfaces through a
/// single `Result` type. Each surface keeps its own precise error; this enum
/// only wraps and classifies them.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Resolve(_) | Self::Eval(EvalError::Resolve(_)) => ErrorClass::Resolution,
            Self::Eval(EvalError::Incomparable { .. }) => ErrorClass::Incomparable,
            Self::Encode(_) | Self::Registry(_) => ErrorClass::Unsupported,
            Self::Decode(_) => ErrorClass::Corruption,
            Self::Config(_) => ErrorClass::Config,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Coarse classification for host-side handling and logging.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// An extractor step could not be applied to an entry.
    Resolution,
    /// Ordering was requested between values that have none.
    Incomparable,
    /// The predicate or registry holds something the codec cannot carry.
    Unsupported,
    /// A byte stream was malformed, truncated or over its limits.
    Corruption,
    Config,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resolution => "resolution",
            Self::Incomparable => "incomparable",
            Self::Unsupported => "unsupported",
            Self::Corruption => "corruption",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
