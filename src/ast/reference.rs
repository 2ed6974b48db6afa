/// A dotted field path written as literal text, e.g. `person.address.city`.
///
/// Only the parser creates these. An interpolated value never becomes a
/// `Reference`, whatever its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    raw: String,
    parts: Vec<String>,
}

impl Reference {
    /// Splits matched text into its parts. The text must already match the
    /// reference grammar.
    pub(crate) fn new(raw: &str) -> Self {
        Reference {
            raw: raw.to_string(),
            parts: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// The text as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The leading part, naming a bound variable
    pub fn head(&self) -> &str {
        &self.parts[0]
    }

    /// Parts traversed after the bound variable
    pub fn tail(&self) -> &[String] {
        &self.parts[1..]
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
