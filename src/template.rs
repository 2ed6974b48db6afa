//! Templated expressions: literal text interleaved with interpolated slots.
//!
//! A [`Template`] is the Rust counterpart of a tagged template string. The
//! text segments carry the comprehension grammar, the [`Slot`]s carry the
//! dynamic pieces (functions, static values, the source collection).
//!
//! ```
//! use objcomp::{Slot, Template, Value};
//!
//! let template = Template::new("{it: ")
//!     .slot(Slot::func(|v| v.clone()))
//!     .text(" over ")
//!     .slot(Value::Array(vec![Value::Integer(1)]))
//!     .text("}");
//!
//! assert_eq!(template.segments().len(), template.slots().len() + 1);
//! ```

use std::{fmt, rc::Rc};

use crate::{parser::ParseError, value::Value};

/// An interpolated function. Receives the current entry of the source.
pub type Callback = Rc<dyn Fn(&Value) -> Result<Value, String>>;

/// One interpolated value of a template.
#[derive(Clone)]
pub enum Slot {
    /// A static value
    Value(Value),
    /// A function of the current entry
    Function(Callback),
}

impl Slot {
    /// Wraps an infallible function of the current entry.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Slot::Function(Rc::new(move |entry| Ok(f(entry))))
    }

    /// Wraps a function that may reject an entry. The error message surfaces
    /// as [`EvalError::Callback`](crate::EvalError::Callback).
    pub fn try_func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + 'static,
    {
        Slot::Function(Rc::new(f))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Slot::Function(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Slot::Value(v) => Some(v),
            Slot::Function(_) => None,
        }
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Value(v) => v.type_name(),
            Slot::Function(_) => "function",
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Slot::Function(_) => f.write_str("Function(..)"),
        }
    }
}

macro_rules! slot_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Slot {
                fn from(v: $ty) -> Self {
                    Slot::Value(v.into())
                }
            }
        )*
    };
}

slot_from!(
    Value,
    bool,
    i64,
    i32,
    f64,
    &str,
    String,
    Vec<Value>,
    crate::value::Mapping,
    serde_json::Value,
);

/// Literal text segments interleaved with slots.
///
/// Always holds one more segment than slots: text before the first slot,
/// between each pair, and after the last.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<String>,
    slots: Vec<Slot>,
}

impl Template {
    /// Starts a template with its leading text.
    pub fn new(text: impl Into<String>) -> Self {
        Template {
            segments: vec![text.into()],
            slots: Vec::new(),
        }
    }

    /// Builds a template from raw parts.
    pub fn from_parts(segments: Vec<String>, slots: Vec<Slot>) -> Result<Self, ParseError> {
        if segments.len() != slots.len() + 1 {
            return Err(ParseError::SegmentMismatch {
                segments: segments.len(),
                slots: slots.len(),
            });
        }
        Ok(Template { segments, slots })
    }

    /// Splits `text` on every occurrence of `marker`, placing `slots` in the
    /// gaps in order.
    ///
    /// ```
    /// use objcomp::{Template, Value};
    ///
    /// let t = Template::split("{it: it over ${}}", "${}", vec![Value::Array(vec![]).into()]).unwrap();
    /// assert_eq!(t.segments(), ["{it: it over ", "}"]);
    /// ```
    pub fn split(text: &str, marker: &str, slots: Vec<Slot>) -> Result<Self, ParseError> {
        let segments = text.split(marker).map(str::to_string).collect();
        Template::from_parts(segments, slots)
    }

    /// Appends a slot followed by an empty text segment.
    pub fn slot(mut self, slot: impl Into<Slot>) -> Self {
        self.slots.push(slot.into());
        self.segments.push(String::new());
        self
    }

    /// Appends text to the last segment.
    pub fn text(mut self, text: &str) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.push_str(text);
        }
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

/// Builds a [`Template`] from string literals and `{ expr }` slots.
///
/// ```
/// use objcomp::{template, Value};
///
/// let nums = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
/// let t = template!("{it: it over " { nums } "}");
/// assert_eq!(t.slots().len(), 1);
/// ```
#[macro_export]
macro_rules! template {
    (@parts $acc:expr; ) => {
        $acc
    };
    (@parts $acc:expr; $text:literal $($rest:tt)*) => {
        $crate::template!(@parts $acc.text($text); $($rest)*)
    };
    (@parts $acc:expr; { $slot:expr } $($rest:tt)*) => {
        $crate::template!(@parts $acc.slot($slot); $($rest)*)
    };
    ($text:literal $($rest:tt)*) => {
        $crate::template!(@parts $crate::Template::new($text); $($rest)*)
    };
    ({ $slot:expr } $($rest:tt)*) => {
        $crate::template!(@parts $crate::Template::new(""); { $slot } $($rest)*)
    };
}

/// Evaluates a comprehension written in [`template!`] syntax.
///
/// ```
/// use objcomp::{to_obj, Value};
///
/// let nums = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
/// let result = to_obj!("{it: it over " { nums } "}").unwrap();
/// assert_eq!(result["2"], Value::Integer(2));
/// ```
#[macro_export]
macro_rules! to_obj {
    ($($parts:tt)*) => {
        $crate::to_obj(&$crate::template!($($parts)*))
    };
}

/// Like [`to_obj!`], collapsing any failure to `None`.
#[macro_export]
macro_rules! to_obj_safe {
    ($($parts:tt)*) => {
        $crate::to_obj_safe(&$crate::template!($($parts)*))
    };
}
