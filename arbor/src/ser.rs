//! Compact JSON output.
//!
//! The writer never inserts whitespace. Strings and keys are re-escaped so that the output always
//! parses back to an equal [`Value`].

use std::fmt::{self, Write};

use crate::value::{Kind, Value};

impl Value {
    /// Render as compact JSON text.
    ///
    /// ```
    /// # use arbor::parse;
    /// let v = parse(r#" { "a" : [ 1 , 2.5 , "x\ny" ] } "#).unwrap();
    /// assert_eq!(v.stringify(), r#"{"a":[1,2.5,"x\ny"]}"#);
    /// ```
    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

/// Same as [`Value::stringify`].
pub fn stringify(value: &Value) -> String {
    value.stringify()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}

fn write_value<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value.kind() {
        Kind::Null => out.write_str("null"),
        Kind::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        Kind::Number(n) => write_number(out, *n),
        Kind::String(s) => write_string(out, s),
        Kind::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Kind::Object(members) => {
            out.write_char('{')?;
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(out, key)?;
                out.write_char(':')?;
                write_value(out, item)?;
            }
            out.write_char('}')
        }
    }
}

/// Shortest digits that read back to the same number, in plain decimal for magnitudes in
/// `[1e-6, 1e21)` and in exponent form outside it. Both `Display` and `LowerExp` for `f64` are
/// locale independent. JSON has no spelling for NaN or the infinities.
fn write_number<W: Write>(out: &mut W, n: f64) -> fmt::Result {
    if !n.is_finite() {
        return out.write_str("null");
    }
    let magnitude = n.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        write!(out, "{n:e}")
    } else {
        write!(out, "{n}")
    }
}

fn write_string<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        let escaped = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{08}' => "\\b",
            '\u{0C}' => "\\f",
            c if c < ' ' => "",
            _ => continue,
        };
        out.write_str(&s[start..i])?;
        if escaped.is_empty() {
            write!(out, "\\u{:04x}", c as u32)?;
        } else {
            out.write_str(escaped)?;
        }
        start = i + c.len_utf8();
    }
    out.write_str(&s[start..])?;
    out.write_char('"')
}
