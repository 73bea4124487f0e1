//! `arbor` is a small JSON library built around an immutable value tree.
//!
//! Text goes in through a strict recursive-descent parser and comes back out through a compact
//! writer:
//!
//! ```
//! use arbor::{parse, Value};
//!
//! let doc = parse(r#"{ "hoge": "str", "piyo": true, "fuga": [1.0e+5, 0.04E2], "hogera": {} }"#)?;
//! assert_eq!(doc.stringify(), r#"{"hoge":"str","piyo":true,"fuga":[100000,4],"hogera":{}}"#);
//!
//! let fuga = doc.get("fuga")?;
//! assert_eq!(fuga.get(0)?.double_value()?, 100000.0);
//! assert_eq!(doc.get("hoge")?.int_value_or(-1), -1);
//!
//! // Values are cheap handles: building a new tree reuses existing subtrees.
//! let wrapped = Value::from(vec![fuga.clone()]);
//! assert!(Value::ptr_eq(wrapped.get(0)?, fuga));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Deviations from a bare-bones JSON reader worth knowing about:
//!
//! - Object members keep their insertion order; equality still ignores order.
//! - Documents may not carry anything but whitespace after the top-level value unless
//!   [`ParseOptions::allow_trailing_input`] is set.
//! - Nesting is capped at [`ParseOptions::max_depth`] ([`DEFAULT_MAX_DEPTH`] by default) so hostile
//!   input cannot exhaust the stack. Trees built directly through the API are not capped, and the
//!   recursive operations on them ([`PartialEq`], [`Value::stringify`], dropping) recurse once per
//!   level.

mod error;
mod options;
mod parser;
mod ser;
#[cfg(feature = "serde")]
mod serde_impl;
mod span;
mod value;

pub use error::{AccessError, ParseError, ParseErrorKind};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse, parse_or_null, parse_with_options};
pub use ser::stringify;
pub use span::{Location, Span};
pub use value::{Index, Kind, Object, Value, ValueType};

pub use indexmap;
