//! # Object Comprehension - Syntax Tree
//!
//! The parsed pieces of a comprehension such as
//!
//! ```text
//! {person.name: person.age for person of ${people}}
//! ```
//!
//! ## Submodules
//!
//! - **[reference]** - Dotted field paths written as literal text
//! - **[expression]** - Key/value expressions tagged by provenance
//! - **[iteration]** - Iteration kinds, bound names and the resolved source
//!
//! ## Iteration Kinds
//!
//! - `over ${array}` binds each item to `it`
//! - `for a, b of ${array}` binds each item, destructuring it when more than
//!   one name is given
//! - `for k in ${mapping}` binds each key of the mapping
//!
//! ## Provenance
//!
//! A key or value written as text (`person.name`) is a [`Reference`]. A key
//! or value supplied as a slot is a function or a literal, and a literal is
//! never traversed, even when it looks like a path.
pub mod expression;
pub mod iteration;
pub mod reference;

pub use expression::{Expression, Position};
pub use iteration::{Fields, IterationKind, Iterable};
pub use reference::Reference;
