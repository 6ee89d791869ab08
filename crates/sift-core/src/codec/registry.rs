use crate::{
    codec::{DecodeError, NodeKind, Reader},
    extract::Accessor,
};
use std::{collections::BTreeMap, fmt, sync::Arc};
use thiserror::Error as ThisError;
use tracing::debug;

/// Constructor for one host accessor type: reads the fields its
/// `Accessor::write_fields` produced.
pub type AccessorDecodeFn = fn(&mut Reader<'_>) -> Result<Arc<dyn Accessor>, DecodeError>;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("accessor identity '{identity}' is already registered")]
    DuplicateIdentity { identity: String },

    #[error("accessor identity '{identity}' is reserved for a built-in node")]
    ReservedIdentity { identity: String },
}

///
/// Registry
///
/// Decoding-side map from wire identity to constructor for host accessor
/// handles. Built-in predicate and extractor nodes never go through the
/// registry; their identities are fixed.
///
/// Populate before decoding, then share immutably.
///

#[derive(Clone, Default)]
pub struct Registry {
    accessors: BTreeMap<&'static str, AccessorDecodeFn>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_accessor(
        &mut self,
        identity: &'static str,
        decode: AccessorDecodeFn,
    ) -> Result<&mut Self, RegistryError> {
        if NodeKind::from_identity(identity).is_some() {
            return Err(RegistryError::ReservedIdentity {
                identity: identity.to_string(),
            });
        }
        if self.accessors.contains_key(identity) {
            return Err(RegistryError::DuplicateIdentity {
                identity: identity.to_string(),
            });
        }

        debug!(identity, "registered accessor decoder");
        self.accessors.insert(identity, decode);

        Ok(self)
    }

    /// Builder-style registration for registries assembled at startup.
    pub fn with_accessor(
        mut self,
        identity: &'static str,
        decode: AccessorDecodeFn,
    ) -> Result<Self, RegistryError> {
        self.register_accessor(identity, decode)?;

        Ok(self)
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.accessors.contains_key(identity)
    }

    pub(crate) fn accessor(&self, identity: &str) -> Option<AccessorDecodeFn> {
        self.accessors.get(identity).copied()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.accessors.keys()).finish()
    }
}
