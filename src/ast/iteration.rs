use crate::{parser::ParseError, value::Value};

/// How the source is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationKind {
    /// `over`: array items, bound to the implicit name `it`
    ///
    /// # Example
    /// ```text
    /// {it.name: it.age over ${people}}
    /// ```
    Implicit,

    /// `for a, b of`: array items, destructured when several names are bound
    ///
    /// # Example
    /// ```text
    /// {key: value for key, value of ${entries}}
    /// ```
    Of,

    /// `for k in`: the keys of a mapping (or indices of an array)
    ///
    /// # Example
    /// ```text
    /// {name: ${lookup} for name in ${ages}}
    /// ```
    In,
}

impl IterationKind {
    /// Whether items of an array are iterated (as opposed to keys).
    pub fn iterates_items(self) -> bool {
        !matches!(self, IterationKind::In)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            IterationKind::Implicit => "over",
            IterationKind::Of => "of",
            IterationKind::In => "in",
        }
    }
}

/// Names bound by the iteration clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    kind: IterationKind,
    names: Vec<String>,
}

impl Fields {
    pub const IMPLICIT_NAME: &'static str = "it";

    /// The single `it` binding of `over`.
    pub fn implicit() -> Self {
        Fields {
            kind: IterationKind::Implicit,
            names: vec![Self::IMPLICIT_NAME.to_string()],
        }
    }

    /// Binds the names of a `for` clause. `in` iterates keys, so it takes a
    /// single name. `over` bindings come from [`Fields::implicit`].
    pub fn new(kind: IterationKind, names: Vec<String>) -> Result<Self, ParseError> {
        if kind == IterationKind::In && names.len() > 1 {
            return Err(ParseError::MultiNameNotAllowedForIn(names));
        }
        Ok(Fields { kind, names })
    }

    pub fn kind(&self) -> IterationKind {
        self.kind
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Several names bound to the positions of each array entry
    pub fn is_destructuring(&self) -> bool {
        self.names.len() > 1
    }

    /// Entry position bound to `name`. A repeated name binds its last
    /// position, as later bindings shadow earlier ones.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().rposition(|n| n == name)
    }
}

/// The resolved sequence of entries to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum Iterable<'t> {
    /// Items of an array source, borrowed from the template
    Items(&'t [Value]),

    /// Keys of a mapping (or indices of an array) as strings
    Keys(Vec<Value>),
}

impl Iterable<'_> {
    pub fn entries(&self) -> &[Value] {
        match self {
            Iterable::Items(items) => items,
            Iterable::Keys(keys) => keys,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_in_binds_one_name() {
        assert!(Fields::new(IterationKind::In, names(&["k"])).is_ok());
        assert_eq!(
            Fields::new(IterationKind::In, names(&["k", "v"])),
            Err(ParseError::MultiNameNotAllowedForIn(names(&["k", "v"])))
        );
    }

    #[test]
    fn test_repeated_name_takes_last_position() {
        let fields = Fields::new(IterationKind::Of, names(&["a", "b", "a"])).unwrap();
        assert_eq!(fields.position("a"), Some(2));
        assert_eq!(fields.position("b"), Some(1));
        assert_eq!(fields.position("c"), None);
    }

    #[test]
    fn test_implicit_binds_it() {
        let fields = Fields::implicit();
        assert_eq!(fields.kind(), IterationKind::Implicit);
        assert_eq!(fields.names(), ["it"]);
        assert!(!fields.is_destructuring());
    }
}
