//! Runtime interpolation of translations.
//!
//! Non-inlined deployments resolve plural tables and `$n` placeholders with
//! [`interpolate`]; the bundle substitution reuses [`Segments`] to splice
//! parameter expressions into template literals instead.

use std::fmt;

use super::translation::{Plural, PluralEntry, Translation};

/// A scalar parameter passed to a translation.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Absent value (`null`/`undefined`); renders as empty text.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Param {
    /// Tag used to select a plural entry, `None` for absent values.
    pub fn as_tag(&self) -> Option<String> {
        match self {
            Param::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Interpret a command-line argument: JSON scalars keep their type,
    /// anything else is taken as text.
    pub fn parse_arg(arg: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(arg) {
            Ok(value @ (serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Number(_))) => Param::from(value),
            _ => Param::Text(arg.to_string()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Null => Ok(()),
            Param::Bool(b) => write!(f, "{}", b),
            Param::Number(n) => f.write_str(&format_number(*n)),
            Param::Text(s) => f.write_str(s),
        }
    }
}

/// Format a number the way JavaScript's `String(n)` does. Magnitudes from
/// `1e21` up and below `1e-6` use exponent form (`1e+21`, `1.5e-7`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Text(s)
    }
}

impl From<bool> for Param {
    fn from(b: bool) -> Self {
        Param::Bool(b)
    }
}

impl From<f64> for Param {
    fn from(n: f64) -> Self {
        Param::Number(n)
    }
}

macro_rules! param_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(n: $t) -> Self {
                    Param::Number(n as f64)
                }
            }
        )*
    };
}

param_from_int!(i32, i64, u32, u64, usize);

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl From<serde_json::Value> for Param {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Param::Null,
            serde_json::Value::Bool(b) => Param::Bool(b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Param::Text(n.to_string()), Param::Number),
            serde_json::Value::String(s) => Param::Text(s),
            other => Param::Text(other.to_string()),
        }
    }
}

/// Build a `Vec<Param>` from heterogeneous values.
///
/// ```
/// use i18n_bake::params;
///
/// let p = params!["world", 3, false];
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::core::interpolate::Param::from($value)),*]
    };
}

/// Interpolate a translation with the given parameters.
///
/// Plural tables consume one parameter per level of nesting, then `$n`
/// placeholders are replaced by `params[n - 1]` and `$$` by `$`.
/// A plural that cannot be resolved yields an empty string.
pub fn interpolate(translation: &Translation, params: &[Param]) -> String {
    let text = match translation {
        Translation::Text(s) => Some(s.as_str()),
        Translation::Plural(plural) => resolve_plural(plural, params),
    };
    text.map(|t| fill_placeholders(t, params))
        .unwrap_or_default()
}

/// Walk a plural table down to its text variant.
///
/// A numeric entry redirects exactly once to the sibling tag with that
/// number; landing on another number resolves to nothing.
fn resolve_plural<'a>(mut plural: &'a Plural, params: &[Param]) -> Option<&'a str> {
    let mut depth = 0;
    loop {
        let tag = params.get(depth).and_then(Param::as_tag);
        let mut entry = plural.select(tag.as_deref())?;
        if let PluralEntry::Redirect(target) = entry {
            entry = plural.get(&target.to_string())?;
        }
        match entry {
            PluralEntry::Text(s) => return Some(s),
            PluralEntry::Redirect(_) => return None,
            PluralEntry::Nested(inner) => plural = inner,
        }
        depth += 1;
    }
}

/// Replace `$1`..`$9` and `$$` in a single pass over `text`. `$0` names no
/// parameter and renders as nothing.
pub fn fill_placeholders(text: &str, params: &[Param]) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in Segments::new(text) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Dollar => out.push('$'),
            Segment::Param(number) => {
                if let Some(param) = param_at(params, number) {
                    out.push_str(&param.to_string());
                }
            }
        }
    }
    out
}

/// The parameter a `$n` placeholder refers to. `$0` refers to none.
pub fn param_at<T>(params: &[T], number: usize) -> Option<&T> {
    number.checked_sub(1).and_then(|index| params.get(index))
}

/// A piece of translation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// An escaped `$$`.
    Dollar,
    /// A `$n` placeholder, numbered as written (`$0`..`$9`).
    Param(usize),
}

/// Splits translation text into literal runs and placeholders.
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let bytes = self.rest.as_bytes();
        if bytes[0] == b'$' {
            match bytes.get(1) {
                Some(b'$') => {
                    self.rest = &self.rest[2..];
                    return Some(Segment::Dollar);
                }
                Some(d @ b'0'..=b'9') => {
                    let number = usize::from(d - b'0');
                    self.rest = &self.rest[2..];
                    return Some(Segment::Param(number));
                }
                _ => {}
            }
        }
        // A literal run ends right before the next special `$`.
        let mut end = 1;
        while end < bytes.len() {
            if bytes[end] == b'$'
                && matches!(bytes.get(end + 1), Some(b'$') | Some(b'0'..=b'9'))
            {
                break;
            }
            end += 1;
        }
        let (literal, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Segment::Literal(literal))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn text(s: &str) -> Translation {
        Translation::text(s)
    }

    fn plural(value: serde_json::Value) -> Translation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(interpolate(&text("hi $1"), &params![1]), "hi 1");
        assert_eq!(interpolate(&text("hi $1 $1"), &params![1]), "hi 1 1");
        assert_eq!(interpolate(&text("$2, $1"), &params!["a", "b"]), "b, a");
    }

    #[test]
    fn test_escaped_dollar() {
        assert_eq!(interpolate(&text("hi $$1"), &params![1]), "hi $1");
        assert_eq!(interpolate(&text("$$$1"), &params![5]), "$5");
        assert_eq!(interpolate(&text("cost: $ 3"), &[]), "cost: $ 3");
    }

    #[test]
    fn test_falsy_values_render_literally() {
        assert_eq!(interpolate(&text("hi $1"), &params![0]), "hi 0");
        assert_eq!(interpolate(&text("hi $1"), &params![false]), "hi false");
    }

    #[test]
    fn test_absent_values_render_empty() {
        assert_eq!(interpolate(&text("hi $1"), &[Param::Null]), "hi ");
        assert_eq!(interpolate(&text("hi $1"), &params![""]), "hi ");
        assert_eq!(interpolate(&text("hi $1"), &[]), "hi ");
        assert_eq!(interpolate(&text("hi $1"), &params![None::<i32>]), "hi ");
    }

    #[test]
    fn test_replacement_text_is_not_reprocessed() {
        assert_eq!(interpolate(&text("$1 $2"), &params!["$2", "x"]), "$2 x");
    }

    #[test]
    fn test_zero_placeholder_renders_empty() {
        assert_eq!(interpolate(&text("a $0 b"), &params![1]), "a  b");
        assert_eq!(interpolate(&text("$0$1"), &params!["x"]), "x");
    }

    #[test]
    fn test_number_formatting_follows_javascript() {
        assert_eq!(Param::from(1e21).to_string(), "1e+21");
        assert_eq!(Param::from(1.5e21).to_string(), "1.5e+21");
        assert_eq!(Param::from(1e-7).to_string(), "1e-7");
        assert_eq!(Param::from(-2.5e-8).to_string(), "-2.5e-8");
        assert_eq!(Param::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Param::from(0.000001).to_string(), "0.000001");
        assert_eq!(Param::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_plural_dispatch() {
        let tr = plural(json!({"*": "hi", "0": "zero", "1": "one"}));
        assert_eq!(interpolate(&tr, &params![1]), "one");
        assert_eq!(interpolate(&tr, &params![0]), "zero");
        assert_eq!(interpolate(&tr, &params![2]), "hi");
        assert_eq!(interpolate(&tr, &params!["1"]), "one");
        assert_eq!(interpolate(&tr, &[]), "hi");
    }

    #[test]
    fn test_plural_interpolates_resolved_text() {
        let tr = plural(json!({"1": "one item", "*": "$1 items"}));
        assert_eq!(interpolate(&tr, &params![1]), "one item");
        assert_eq!(interpolate(&tr, &params![7]), "7 items");
    }

    #[test]
    fn test_plural_redirect() {
        let tr = plural(json!({"0": "none", "1": "some", "2": 1, "3": 1, "*": "many"}));
        assert_eq!(interpolate(&tr, &params![2]), "some");
        assert_eq!(interpolate(&tr, &params![3]), "some");
        assert_eq!(interpolate(&tr, &params![9]), "many");
    }

    #[test]
    fn test_plural_redirect_is_single_level() {
        let tr = plural(json!({"1": "one", "2": 1, "3": 2, "*": "many"}));
        assert_eq!(interpolate(&tr, &params![3]), "");
    }

    #[test]
    fn test_plural_redirect_to_missing_tag() {
        let tr = plural(json!({"2": 5, "*": "many"}));
        assert_eq!(interpolate(&tr, &params![2]), "");
    }

    #[test]
    fn test_fallback_redirect() {
        let tr = plural(json!({"1": "one", "*": 1}));
        assert_eq!(interpolate(&tr, &params![4]), "one");
    }

    #[test]
    fn test_nested_plural_consumes_parameters_in_order() {
        let tr = plural(json!({
            "0": {"0": "nothing at all", "*": "$2 girls"},
            "*": {"0": "$1 boys", "*": "$1 boys and $2 girls"}
        }));
        assert_eq!(interpolate(&tr, &params![0, 0]), "nothing at all");
        assert_eq!(interpolate(&tr, &params![0, 3]), "3 girls");
        assert_eq!(interpolate(&tr, &params![2, 0]), "2 boys");
        assert_eq!(interpolate(&tr, &params![2, 3]), "2 boys and 3 girls");
    }

    #[test]
    fn test_plural_without_match_or_fallback() {
        let tr = plural(json!({"1": "one"}));
        assert_eq!(interpolate(&tr, &params![2]), "");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Param::from(1.5).to_string(), "1.5");
        assert_eq!(Param::from(3.0).to_string(), "3");
        assert_eq!(Param::from(-0.0).to_string(), "0");
        assert_eq!(Param::from(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_parse_arg() {
        assert_eq!(Param::parse_arg("3"), Param::Number(3.0));
        assert_eq!(Param::parse_arg("false"), Param::Bool(false));
        assert_eq!(Param::parse_arg("null"), Param::Null);
        assert_eq!(Param::parse_arg("world"), Param::Text("world".into()));
        assert_eq!(Param::parse_arg("\"quoted\""), Param::Text("\"quoted\"".into()));
    }

    #[test]
    fn test_segments() {
        let segments: Vec<Segment<'_>> = Segments::new("a$1b$$c$").collect();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("a"),
                Segment::Param(1),
                Segment::Literal("b"),
                Segment::Dollar,
                Segment::Literal("c$"),
            ]
        );
    }
}
