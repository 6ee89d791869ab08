use crate::{
    codec::{DecodeError, EncodeError, Reader, Registry, Writer},
    extract::{Accessor, ResolveError},
    value::{Record, Value},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

pub(crate) const UPPER_IDENTITY: &str = "test.UpperField";
pub(crate) const COUNTING_IDENTITY: &str = "test.CountingField";

/// `Person { age }` record.
pub(crate) fn person(age: impl Into<Value>) -> Value {
    Value::Record(Record::new("Person").with_field("age", age))
}

/// `Person { age, name }` record.
pub(crate) fn named_person(name: &str, age: i64) -> Value {
    Value::Record(
        Record::new("Person")
            .with_field("age", age)
            .with_field("name", name),
    )
}

///
/// UpperField
///
/// Reads one text field and upper-cases it. Carries the field name on the
/// wire, so it exercises accessor-owned fields. Named `<field>.upper`, since
/// its output is not the stored property.
///

#[derive(Debug)]
pub(crate) struct UpperField {
    pub(crate) field: String,
    name: String,
}

impl UpperField {
    fn new(field: String) -> Self {
        let name = format!("{field}.upper");

        Self { field, name }
    }

    pub(crate) fn handle(field: &str) -> Arc<dyn Accessor> {
        Arc::new(Self::new(field.to_string()))
    }

    pub(crate) fn decode(input: &mut Reader<'_>) -> Result<Arc<dyn Accessor>, DecodeError> {
        Ok(Arc::new(Self::new(input.read_str()?)))
    }
}

impl Accessor for UpperField {
    fn identity(&self) -> &'static str {
        UPPER_IDENTITY
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn access(&self, value: &Value) -> Result<Value, ResolveError> {
        let field = value
            .as_record()
            .and_then(|record| record.field(&self.field))
            .ok_or_else(|| ResolveError::MissingProperty {
                name: self.field.clone(),
                kind: value.tag(),
            })?;

        match field {
            Value::Text(text) => Ok(Value::Text(text.to_uppercase())),
            other => Err(ResolveError::Accessor {
                name: self.field.clone(),
                message: format!("expected text, found {}", other.tag()),
            }),
        }
    }

    fn write_fields(&self, out: &mut Writer) -> Result<(), EncodeError> {
        out.write_str(&self.field)
    }
}

///
/// CountingField
///
/// Plain read of a record field that counts how often it was asked to.
///

#[derive(Debug)]
pub(crate) struct CountingField {
    pub(crate) field: String,
    pub(crate) calls: Arc<AtomicUsize>,
}

impl CountingField {
    pub(crate) fn handle(field: &str) -> (Arc<dyn Accessor>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let accessor = Arc::new(Self {
            field: field.to_string(),
            calls: Arc::clone(&calls),
        });

        (accessor, calls)
    }
}

impl Accessor for CountingField {
    fn identity(&self) -> &'static str {
        COUNTING_IDENTITY
    }

    fn name(&self) -> &str {
        &self.field
    }

    fn access(&self, value: &Value) -> Result<Value, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        value
            .as_record()
            .and_then(|record| record.field(&self.field))
            .cloned()
            .ok_or_else(|| ResolveError::MissingProperty {
                name: self.field.clone(),
                kind: value.tag(),
            })
    }
}

/// Registry that knows `UpperField`.
pub(crate) fn test_registry() -> Registry {
    Registry::new()
        .with_accessor(UPPER_IDENTITY, UpperField::decode)
        .expect("test accessor identity should register")
}
