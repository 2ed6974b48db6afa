//! Grammar reference for the objcomp CLI

/// Get the grammar reference text
pub fn get_grammar_reference() -> &'static str {
    r#"OBJECT COMPREHENSIONS

A comprehension builds a JSON object from a source array or object:

  {key: value <iteration> ${}}

Each ${} in the expression is a slot filled with a JSON value. Slots are
taken from --slot in order; the last one (the source) comes from --input or
stdin.

GRAMMAR

  expr       := "{"* key ":" value iteration SLOT "}"*
  key        := reference | SLOT
  value      := reference | SLOT
  reference  := IDENT ("." IDENT)*
  iteration  := "over"
              | "for" IDENT ("," IDENT)* ("of" | "in")

ITERATION

  over ${}              each array item, bound to `it`
  for x of ${}          each array item, bound to `x`
  for k, v of ${}       each array item, destructured by position
  for k in ${}          each key of an object (indices of an array)

KEYS

  Keys must be strings or numbers. When two entries produce the same key,
  the later one wins. Missing fields in a value are left out of the output.

EXAMPLES

  echo '[{"name":"Aidan","age":20}]' | objcomp eval '{it.name: it.age over ${}}'
  => {"Aidan":20}

  objcomp eval '{k: v for k, v of ${}}' --input '[["a",1],["b",2]]'
  => {"a":1,"b":2}

  objcomp eval '{it.name: ${} over ${}}' --slot true --input '[{"name":"x"}]'
  => {"x":true}

  objcomp eval '{k: k for k in ${}}' --input '{"a":1,"b":2}'
  => {"a":"a","b":"b"}
"#
}
