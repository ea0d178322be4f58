//! Composition constructors.
//!
//! The infallible constructors take [`AnySchema`] children, which can only
//! be produced from finalized schemas. [`try_compose`] accepts erased nodes
//! and checks the same rules at run time.
//!
//! Empty compositions are accepted by the infallible constructors:
//! `one_of([])` and `any_of([])` match nothing, `all_of([])` matches
//! everything.

use contour_core::SchemaError;

use crate::model::{Combinator, CompositeSpec, Presence, SchemaNode};

use super::{AnySchema, Schema};

fn compose<I>(combinator: Combinator, children: I) -> Schema<CompositeSpec>
where
    I: IntoIterator<Item = AnySchema>,
{
    let children = children.into_iter().map(AnySchema::into_node).collect();
    Schema::from_spec(CompositeSpec::new(combinator, children))
}

/// Exactly one child must match.
pub fn one_of<I: IntoIterator<Item = AnySchema>>(children: I) -> Schema<CompositeSpec> {
    compose(Combinator::OneOf, children)
}

/// Every child must match.
pub fn all_of<I: IntoIterator<Item = AnySchema>>(children: I) -> Schema<CompositeSpec> {
    compose(Combinator::AllOf, children)
}

/// At least one child must match.
pub fn any_of<I: IntoIterator<Item = AnySchema>>(children: I) -> Schema<CompositeSpec> {
    compose(Combinator::AnyOf, children)
}

/// The child must not match.
pub fn not(child: impl Into<AnySchema>) -> Schema<CompositeSpec> {
    compose(Combinator::Not, [child.into()])
}

/// Build a composition from erased nodes, checking arity and finalization.
///
/// # Errors
///
/// - [`SchemaError::UnfinalizedChild`] if a child was never finalized.
/// - [`SchemaError::NotArity`] if `not` is given other than one child.
/// - [`SchemaError::EmptyComposition`] if another combinator is given none.
pub fn try_compose(
    combinator: Combinator,
    children: Vec<SchemaNode>,
) -> Result<Schema<CompositeSpec>, SchemaError> {
    match combinator {
        Combinator::Not if children.len() != 1 => {
            return Err(SchemaError::NotArity {
                count: children.len(),
            });
        }
        _ if children.is_empty() => {
            return Err(SchemaError::EmptyComposition {
                combinator: combinator.keyword(),
            });
        }
        _ => {}
    }
    if let Some(index) = children
        .iter()
        .position(|child| child.presence() == Presence::Unfinalized)
    {
        return Err(SchemaError::UnfinalizedChild {
            combinator: combinator.keyword(),
            index,
        });
    }
    Ok(Schema::from_spec(CompositeSpec::new(combinator, children)))
}
