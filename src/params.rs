//! Parameter-name extraction.
//!
//! Signature parsing is purely lexical: everything between the first `(` and
//! the next `)` is split on commas. Default values, destructuring patterns or
//! anything else containing a comma will be mis-split. Declare names
//! explicitly with [`Method::new`] when that matters.

use crate::method::{Method, ParamSource};

/// Ordered parameter names of a method, recomputed on every call.
pub fn parse_params(method: &Method) -> Vec<String> {
    match method.params() {
        ParamSource::Declared(names) => names.to_vec(),
        ParamSource::Signature(source) => parse_signature(source),
    }
}

/// Extracts parameter names from a textual signature.
///
/// Never fails: source without a parenthesized group yields no names. An
/// unterminated group runs to the end of the source.
///
/// ```rust
/// use ferrous_autowire::parse_signature;
///
/// assert_eq!(parse_signature("function greet(name, age, city) {}"), ["name", "age", "city"]);
/// assert!(parse_signature("function noop() {}").is_empty());
/// assert!(parse_signature("not a function").is_empty());
/// ```
pub fn parse_signature(source: &str) -> Vec<String> {
    let Some(open) = source.find('(') else {
        return Vec::new();
    };
    let rest = &source[open + 1..];
    let list = rest.find(')').map_or(rest, |close| &rest[..close]);

    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
