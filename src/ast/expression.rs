use crate::{
    ast::Reference,
    template::{Callback, Slot},
    value::Value,
};

/// The key or value half of a comprehension.
///
/// The variant records where the expression came from: `Reference` only
/// from literal text, `Function` and `Literal` only from slots.
#[derive(Clone)]
pub enum Expression<'t> {
    /// A field path over the bound names
    ///
    /// # Example
    /// ```text
    /// {person.name: person.age for person of ${people}}
    /// ```
    Reference(Reference),

    /// An interpolated function of the entry
    Function(&'t Callback),

    /// An interpolated static value, used as-is for every entry
    Literal(&'t Value),
}

impl<'t> Expression<'t> {
    pub fn from_slot(slot: &'t Slot) -> Self {
        match slot {
            Slot::Value(v) => Expression::Literal(v),
            Slot::Function(f) => Expression::Function(f),
        }
    }
}

impl std::fmt::Debug for Expression<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Reference(r) => f.debug_tuple("Reference").field(r).finish(),
            Expression::Function(_) => f.write_str("Function(..)"),
            Expression::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
        }
    }
}

/// Which half of the comprehension an expression fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Key,
    Value,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Key => f.write_str("key"),
            Position::Value => f.write_str("value"),
        }
    }
}
