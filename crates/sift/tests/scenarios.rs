//! End-to-end scenarios over the public surface: build, evaluate, collect
//! index candidates, ship over the wire, evaluate again.

use sift::{
    DecodeError, EncodeError, Error, ErrorClass, Registry, SiftConfig, decode, decode_with_limits,
    encode,
    core::{
        codec::{Reader, Writer},
        extract::ResolveError,
        index::IndexBounds,
    },
    prelude::*,
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn person(name: &str, age: i64) -> MapEntry {
    MapEntry::new(
        name,
        Record::new("Person")
            .with_field("name", name)
            .with_field("age", age),
    )
}

///
/// InitialLetter
///
/// Host accessor: first character of a text field, carried on the wire by
/// field name. Derived values get their own index name, `<field>.initial`.
///

#[derive(Debug)]
struct InitialLetter {
    field: String,
    name: String,
}

impl InitialLetter {
    const IDENTITY: &'static str = "host.InitialLetter";

    fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        let name = format!("{field}.initial");

        Self { field, name }
    }

    fn decode(input: &mut Reader<'_>) -> Result<Arc<dyn Accessor>, DecodeError> {
        Ok(Arc::new(Self::new(input.read_str()?)))
    }
}

impl Accessor for InitialLetter {
    fn identity(&self) -> &'static str {
        Self::IDENTITY
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn access(&self, value: &Value) -> Result<Value, ResolveError> {
        let text = value
            .as_record()
            .and_then(|record| record.field(&self.field))
            .and_then(Value::as_text)
            .ok_or_else(|| ResolveError::Accessor {
                name: self.field.clone(),
                message: "expected a text field".to_string(),
            })?;

        Ok(text.chars().next().map(String::from).into())
    }

    fn write_fields(&self, out: &mut Writer) -> Result<(), EncodeError> {
        out.write_str(&self.field)
    }
}

#[test]
fn working_age_between_is_inclusive() {
    let working_age = between(property("age"), 18, 65);

    assert_eq!(working_age.apply(&person("a", 17)), Ok(false));
    assert_eq!(working_age.apply(&person("b", 18)), Ok(true));
    assert_eq!(working_age.apply(&person("c", 65)), Ok(true));
    assert_eq!(working_age.apply(&person("d", 66)), Ok(false));
}

#[test]
fn working_age_strict_bounds_exclude_the_edges() {
    let working_age = and(
        greater_than(property("age"), 18),
        less_than(property("age"), 65),
    );

    assert_eq!(working_age.apply(&person("a", 18)), Ok(false));
    assert_eq!(working_age.apply(&person("b", 19)), Ok(true));
    assert_eq!(working_age.apply(&person("c", 64)), Ok(true));
    assert_eq!(working_age.apply(&person("d", 65)), Ok(false));
}

#[test]
fn query_plan_splits_into_index_probes_and_residual_filter() {
    init_tracing();

    let predicate = between(property("age"), 18, 65)
        & equal(property("name"), "ada")
        & (equal(property("city"), "Oslo") | equal(property("city"), "Bergen"))
        & not(property("retired"));
    let candidates = collect_indexable(&predicate);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].index_name().as_str(), "age");
    assert_eq!(candidates[0].range(), RangeKind::Between);
    assert_eq!(
        candidates[0].bounds(),
        &IndexBounds::Range {
            from: Value::Int(18),
            to: Value::Int(65),
        }
    );
    assert_eq!(candidates[1].index_name().as_str(), "name");
    assert_eq!(candidates[1].range(), RangeKind::Equal);
}

#[test]
fn host_accessor_survives_the_wire() {
    init_tracing();

    let initial = handle(Arc::new(InitialLetter::new("name")));
    let predicate = equal(initial, "a") & greater_equal(property("age"), 30);
    let bytes = encode(&predicate).expect("predicate should encode");

    let registry = Registry::new()
        .with_accessor(InitialLetter::IDENTITY, InitialLetter::decode)
        .expect("host identity should register");
    let decoded = decode(&bytes, &registry).expect("predicate should decode");

    assert_eq!(decoded, predicate);
    for entry in [person("ada", 36), person("alan", 30), person("bob", 40)] {
        assert_eq!(decoded.apply(&entry), predicate.apply(&entry));
    }
    assert_eq!(decoded.apply(&person("ada", 36)), Ok(true));

    let candidates = collect_indexable(&decoded);
    assert_eq!(candidates[0].index_name().as_str(), "name.initial");
    assert_eq!(candidates[0].value(), Some(&Value::from("a")));
    assert_eq!(candidates[1].index_name().as_str(), "age");
    assert_eq!(candidates[1].range(), RangeKind::GreaterEqual);
}

#[test]
fn configured_limits_bound_untrusted_input() {
    init_tracing();

    let config = SiftConfig::from_toml_str("[codec]\nmax_depth = 1\n").expect("config parses");
    let bytes = encode(&equal(property("age"), 1)).expect("predicate should encode");
    let err = decode_with_limits(&bytes, &Registry::new(), config.codec_limits())
        .expect_err("extractor nests below the predicate");

    let err = Error::from(err);
    assert_eq!(err.class(), ErrorClass::Corruption);
    assert!(
        err.display_with_class().starts_with("corruption: nesting depth 2"),
        "unexpected error: {err}"
    );
}

#[test]
fn errors_unify_under_the_crate_error() {
    let missing = equal(property("salary"), 1)
        .apply(&person("ada", 36))
        .map_err(Error::from)
        .expect_err("salary is not a field");

    assert_eq!(missing.class(), ErrorClass::Resolution);
}
