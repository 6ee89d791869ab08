//! Per-node field layouts. Every node is written as its identity string
//! followed by its fields; readers mirror the write order exactly.

use crate::{
    codec::{DecodeError, EncodeError, NodeKind, Reader, Registry, Writer},
    extract::{Extractor, Step},
    model::TypeTag,
    predicate::{
        AndOrPredicate, BetweenPredicate, ComparePredicate, EqualPredicate, NotPredicate, Operand,
        Predicate,
    },
};
use tracing::trace;

///
/// TypeTag wire kinds
///

const TAG_ANY: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_NUMBER: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_TEXT: u8 = 5;
const TAG_LIST: u8 = 6;
const TAG_ANY_RECORD: u8 = 7;
const TAG_NAMED_RECORD: u8 = 8;

// ---- write -------------------------------------------------------------

pub(super) fn write_predicate(out: &mut Writer, predicate: &Predicate) -> Result<(), EncodeError> {
    let kind = NodeKind::of(predicate);
    trace!(identity = kind.identity(), "encode predicate node");
    out.write_str(kind.identity())?;

    match predicate {
        Predicate::Equal(eq) => write_operands(out, &eq.lhs, &eq.rhs),
        Predicate::Compare(cmp) => {
            write_operands(out, &cmp.lhs, &cmp.rhs)?;
            out.write_bool(cmp.inclusive);
            out.write_bool(cmp.less);

            Ok(())
        }
        Predicate::Between(between) => {
            write_extractor(out, &between.lhs)?;
            out.write_literal(&between.from)?;
            out.write_literal(&between.to)
        }
        Predicate::InstanceOf(tag) => write_type_tag(out, tag),
        Predicate::Not(NotPredicate::Constant(value)) => {
            out.write_bool(true);
            out.write_bool(*value);

            Ok(())
        }
        Predicate::Not(NotPredicate::Expression(extractor)) => {
            out.write_bool(false);
            write_extractor(out, extractor)
        }
        Predicate::AndOr(node) => {
            if node.children().is_empty() {
                return Err(EncodeError::EmptyComposite);
            }

            out.write_bool(node.is_and());
            out.write_len(node.children().len())?;
            for child in node.children() {
                write_predicate(out, child)?;
            }

            Ok(())
        }
    }
}

// Shared by Equal and Compare: lhs, expression flag, then rhs.
fn write_operands(out: &mut Writer, lhs: &Extractor, rhs: &Operand) -> Result<(), EncodeError> {
    write_extractor(out, lhs)?;
    out.write_bool(rhs.is_expression());

    match rhs {
        Operand::Expression(extractor) => write_extractor(out, extractor),
        Operand::Literal(value) => out.write_literal(value),
    }
}

pub(super) fn write_extractor(out: &mut Writer, extractor: &Extractor) -> Result<(), EncodeError> {
    out.write_str(NodeKind::Extractor.identity())?;
    out.write_len(extractor.len())?;

    for step in extractor.steps() {
        match step {
            Step::Name(name) => {
                out.write_bool(true);
                out.write_str(name)?;
            }
            Step::Handle(accessor) => {
                out.write_bool(false);
                out.write_str(accessor.identity())?;
                accessor.write_fields(out)?;
            }
        }
    }

    Ok(())
}

fn write_type_tag(out: &mut Writer, tag: &TypeTag) -> Result<(), EncodeError> {
    match tag {
        TypeTag::Any => out.write_u8(TAG_ANY),
        TypeTag::Bool => out.write_u8(TAG_BOOL),
        TypeTag::Number => out.write_u8(TAG_NUMBER),
        TypeTag::Int => out.write_u8(TAG_INT),
        TypeTag::Float => out.write_u8(TAG_FLOAT),
        TypeTag::Text => out.write_u8(TAG_TEXT),
        TypeTag::List => out.write_u8(TAG_LIST),
        TypeTag::Record(None) => out.write_u8(TAG_ANY_RECORD),
        TypeTag::Record(Some(name)) => {
            out.write_u8(TAG_NAMED_RECORD);
            out.write_str(name)?;
        }
    }

    Ok(())
}

// ---- read --------------------------------------------------------------

pub(super) fn read_predicate(
    input: &mut Reader<'_>,
    registry: &Registry,
) -> Result<Predicate, DecodeError> {
    input.nested(|input| {
        let offset = input.offset();
        let identity = input.read_str()?;
        let kind = expect_kind(&identity, offset, registry)?;
        trace!(identity = kind.identity(), offset, "decode predicate node");

        match kind {
            NodeKind::Equal => {
                let (lhs, rhs) = read_operands(input, registry)?;

                Ok(Predicate::Equal(EqualPredicate { lhs, rhs }))
            }
            NodeKind::Compare => {
                let (lhs, rhs) = read_operands(input, registry)?;
                let inclusive = input.read_bool()?;
                let less = input.read_bool()?;

                Ok(Predicate::Compare(ComparePredicate {
                    lhs,
                    rhs,
                    inclusive,
                    less,
                }))
            }
            NodeKind::Between => {
                let lhs = read_extractor(input, registry)?;
                let from = input.read_literal()?;
                let to = input.read_literal()?;

                Ok(Predicate::Between(BetweenPredicate { lhs, from, to }))
            }
            NodeKind::InstanceOf => Ok(Predicate::InstanceOf(read_type_tag(input)?)),
            NodeKind::Not => {
                if input.read_bool()? {
                    Ok(Predicate::Not(NotPredicate::Constant(input.read_bool()?)))
                } else {
                    let extractor = read_extractor(input, registry)?;

                    Ok(Predicate::Not(NotPredicate::Expression(extractor)))
                }
            }
            NodeKind::AndOr => {
                let is_and = input.read_bool()?;
                let count = input.read_count("composite children")?;
                let children = (0..count)
                    .map(|_| read_predicate(input, registry))
                    .collect::<Result<Vec<_>, _>>()?;

                AndOrPredicate::new(is_and, children)
                    .map(Predicate::AndOr)
                    .ok_or(DecodeError::EmptyComposite { offset })
            }
            NodeKind::Extractor => Err(DecodeError::UnexpectedType {
                identity,
                expected: "predicate",
                offset,
            }),
        }
    })
}

fn read_operands(
    input: &mut Reader<'_>,
    registry: &Registry,
) -> Result<(Extractor, Operand), DecodeError> {
    let lhs = read_extractor(input, registry)?;
    let rhs = if input.read_bool()? {
        Operand::Expression(read_extractor(input, registry)?)
    } else {
        Operand::Literal(input.read_literal()?)
    };

    Ok((lhs, rhs))
}

pub(super) fn read_extractor(
    input: &mut Reader<'_>,
    registry: &Registry,
) -> Result<Extractor, DecodeError> {
    input.nested(|input| {
        let offset = input.offset();
        let identity = input.read_str()?;
        if expect_kind(&identity, offset, registry)? != NodeKind::Extractor {
            return Err(DecodeError::UnexpectedType {
                identity,
                expected: "extractor",
                offset,
            });
        }

        let count_offset = input.offset();
        let count = input.read_count("extractor steps")?;
        if count == 0 {
            return Err(DecodeError::EmptyExtractor {
                offset: count_offset,
            });
        }

        let mut extractor = Extractor::new(read_step(input, registry)?);
        for _ in 1..count {
            extractor = extractor.then(read_step(input, registry)?);
        }

        Ok(extractor)
    })
}

fn read_step(input: &mut Reader<'_>, registry: &Registry) -> Result<Step, DecodeError> {
    if input.read_bool()? {
        return Ok(Step::Name(input.read_str()?));
    }

    let offset = input.offset();
    let identity = input.read_str()?;
    let Some(decode) = registry.accessor(&identity) else {
        return Err(DecodeError::UnknownType { identity, offset });
    };

    input.nested(decode).map(Step::Handle)
}

fn read_type_tag(input: &mut Reader<'_>) -> Result<TypeTag, DecodeError> {
    let offset = input.offset();

    Ok(match input.read_u8()? {
        TAG_ANY => TypeTag::Any,
        TAG_BOOL => TypeTag::Bool,
        TAG_NUMBER => TypeTag::Number,
        TAG_INT => TypeTag::Int,
        TAG_FLOAT => TypeTag::Float,
        TAG_TEXT => TypeTag::Text,
        TAG_LIST => TypeTag::List,
        TAG_ANY_RECORD => TypeTag::Record(None),
        TAG_NAMED_RECORD => TypeTag::Record(Some(input.read_str()?)),
        tag => return Err(DecodeError::InvalidTypeTag { tag, offset }),
    })
}

// Resolve a built-in identity. Accessor identities are only legal in step
// position, so finding one here is a structural error, not an unknown type.
fn expect_kind(
    identity: &str,
    offset: usize,
    registry: &Registry,
) -> Result<NodeKind, DecodeError> {
    if let Some(kind) = NodeKind::from_identity(identity) {
        return Ok(kind);
    }

    if registry.contains(identity) {
        return Err(DecodeError::UnexpectedType {
            identity: identity.to_string(),
            expected: "built-in node",
            offset,
        });
    }

    Err(DecodeError::UnknownType {
        identity: identity.to_string(),
        offset,
    })
}
