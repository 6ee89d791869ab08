
use crate::{
    codec::{EncodeError, Writer},
    entry::Entry,
    model::ObjectModel,
    value::{Value, ValueTag},
};
use std::{fmt, iter, sync::Arc};
use thiserror::Error as ThisError;

///
/// ResolveError
///
/// Property resolution failure. Terminates the single evaluation that hit it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResolveError {
    #[error("cannot apply step {step} ('{name}') to a null value")]
    NullIntermediate { step: usize, name: String },

    #[error("property '{name}' does not exist on {kind} value")]
    MissingProperty { name: String, kind: ValueTag },

    #[error("accessor '{name}' failed: {message}")]
    Accessor { name: String, message: String },
}

///
/// Accessor
///
/// Pre-resolved, host-defined property accessor. Accessors travel across the
/// wire under their `identity`; the decoding side must register a matching
/// constructor in its codec `Registry`.
///

pub trait Accessor: fmt::Debug + Send + Sync {
    /// Stable wire identity. Must be unique per accessor type.
    fn identity(&self) -> &'static str;

    /// Property name this accessor stands for.
    ///
    /// A single-step handle extractor is indexed under this name, so it may
    /// equal a stored property only when `access` is a plain read of that
    /// property. Accessors that derive or transform a value must return a
    /// name of their own, e.g. `"name.initial"` rather than `"name"`.
    fn name(&self) -> &str;

    /// Read the property from a non-null value.
    fn access(&self, value: &Value) -> Result<Value, ResolveError>;

    /// Write accessor-owned fields after the identity. Stateless accessors
    /// write nothing.
    fn write_fields(&self, _out: &mut Writer) -> Result<(), EncodeError> {
        Ok(())
    }
}

///
/// Step
///

#[derive(Clone, Debug)]
pub enum Step {
    Name(String),
    Handle(Arc<dyn Accessor>),
}

impl Step {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Handle(accessor) => accessor.name(),
        }
    }

    fn apply(
        &self,
        position: usize,
        value: &Value,
        model: &dyn ObjectModel,
    ) -> Result<Value, ResolveError> {
        if value.is_null() {
            return Err(ResolveError::NullIntermediate {
                step: position,
                name: self.name().to_string(),
            });
        }

        match self {
            Self::Name(name) => model.resolve_property(value, name),
            Self::Handle(accessor) => accessor.access(value),
        }
    }
}

// Handles are compared by wire identity and name; two handles that encode
// the same way are the same step.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => a == b,
            (Self::Handle(a), Self::Handle(b)) => {
                Arc::ptr_eq(a, b) || (a.identity() == b.identity() && a.name() == b.name())
            }
            _ => false,
        }
    }
}

///
/// Extractor
///
/// Non-empty chain of property steps applied left to right. The chain is
/// extended by consuming builder calls, so it can only grow while it is
/// exclusively owned.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Extractor {
    head: Step,
    rest: Vec<Step>,
}

impl Extractor {
    #[must_use]
    pub const fn new(step: Step) -> Self {
        Self {
            head: step,
            rest: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Step::Name(name.into()))
    }

    #[must_use]
    pub fn from_handle(accessor: Arc<dyn Accessor>) -> Self {
        Self::new(Step::Handle(accessor))
    }

    /// Append a named step.
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        self.then(Step::Name(name.into()))
    }

    /// Append an accessor-handle step.
    #[must_use]
    pub fn handle(self, accessor: Arc<dyn Accessor>) -> Self {
        self.then(Step::Handle(accessor))
    }

    #[must_use]
    pub fn then(mut self, step: Step) -> Self {
        self.rest.push(step);
        self
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        iter::once(&self.head).chain(&self.rest)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rest.len() + 1
    }

    // A chain always has a head step.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn is_direct(&self) -> bool {
        self.rest.is_empty()
    }

    /// Index name of a direct single-step extractor; `None` for chains.
    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.is_direct().then(|| self.head.name())
    }

    /// Resolve against an entry's value.
    pub fn resolve<E: Entry + ?Sized>(
        &self,
        entry: &E,
        model: &dyn ObjectModel,
    ) -> Result<Value, ResolveError> {
        self.resolve_value(entry.value(), model)
    }

    pub fn resolve_value(
        &self,
        input: &Value,
        model: &dyn ObjectModel,
    ) -> Result<Value, ResolveError> {
        let mut current = self.head.apply(0, input, model)?;
        for (offset, step) in self.rest.iter().enumerate() {
            current = step.apply(offset + 1, &current, model)?;
        }

        Ok(current)
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.steps().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            match step {
                Step::Name(name) => f.write_str(name)?,
                Step::Handle(accessor) => write!(f, "{}()", accessor.name())?,
            }
        }

        Ok(())
    }
}
