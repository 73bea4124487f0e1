//! Recursive-descent JSON parser.
//!
//! One [`Parser`] lives for exactly one call to [`parse_with_options`]: it owns the cursor (a byte
//! offset into the borrowed source) and the current nesting depth, and is dropped when the call
//! returns. The cursor only ever rests on a `char` boundary because it is only advanced past ASCII
//! bytes, whole `char`s, or runs of string content that end at an ASCII delimiter.

use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};
use crate::options::ParseOptions;
use crate::span::Span;
use crate::value::{Object, Value};

/// Parse a complete JSON document with the default [`ParseOptions`].
///
/// ```
/// let v = arbor::parse(r#"{"x": 1, "y": [true, null]}"#).unwrap();
/// assert_eq!(v.get("x").unwrap().int_value(), Ok(1));
/// assert!(arbor::parse("[1,]").is_err());
/// ```
pub fn parse(src: &str) -> Result<Value, ParseError> {
    parse_with_options(src, ParseOptions::default())
}

pub fn parse_with_options(src: &str, options: ParseOptions) -> Result<Value, ParseError> {
    Parser::new(src, options).parse_document()
}

/// Parse `src`, yielding null if it is not valid JSON. The error is discarded; use [`parse`] to
/// keep it.
pub fn parse_or_null(src: &str) -> Value {
    parse(src).unwrap_or_default()
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str, options: ParseOptions) -> Self {
        Parser {
            src,
            pos: 0,
            depth: 0,
            options,
        }
    }

    fn parse_document(mut self) -> Result<Value, ParseError> {
        let value = self.parse_value()?;
        if !self.options.allow_trailing_input {
            self.skip_whitespace();
            if self.pos < self.src.len() {
                return Err(self.error_here(ParseErrorKind::TrailingCharacters));
            }
        }
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Consume `byte` if it is next.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Returns how many digits were skipped.
    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// The span from `start` up to and including the character under the cursor.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos + self.current_char().map_or(0, char::len_utf8))
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.span_from(self.pos))
    }

    /// `kind` at the cursor, or [`ParseErrorKind::UnexpectedEof`] if the input ran out.
    fn expected_here(&self, kind: ParseErrorKind) -> ParseError {
        match self.current_char() {
            Some(_) => self.error_here(kind),
            None => self.error_here(ParseErrorKind::UnexpectedEof),
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => self.parse_string().map(Value::from),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b'n') => self.parse_literal("null").map(|()| Value::null()),
            Some(b't') => self.parse_literal("true").map(|()| Value::from(true)),
            Some(b'f') => self.parse_literal("false").map(|()| Value::from(false)),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            _ => Err(self.expected_here(ParseErrorKind::UnexpectedCharacter(
                self.current_char().unwrap_or_default(),
            ))),
        }
    }

    fn parse_literal(&mut self, word: &'static str) -> Result<(), ParseError> {
        if self.src[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(())
        } else {
            Err(self.error_here(ParseErrorKind::InvalidLiteral { expected: word }))
        }
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        self.eat(b'-');

        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(ParseError::new(
                        ParseErrorKind::LeadingZero,
                        self.span_from(start),
                    ));
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(self.invalid_number(start)),
        }

        if self.eat(b'.') && self.skip_digits() == 0 {
            return Err(self.invalid_number(start));
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        let span = Span::new(start, self.pos);
        let n: f64 = self.src[start..self.pos]
            .parse()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidNumber, span))?;
        if n.is_infinite() {
            return Err(ParseError::new(ParseErrorKind::NumberOutOfRange, span));
        }
        Ok(Value::from(n))
    }

    fn invalid_number(&self, start: usize) -> ParseError {
        ParseError::new(ParseErrorKind::InvalidNumber, self.span_from(start))
    }

    /// The cursor must be on the opening quote.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            let run = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            out.push_str(&self.src[run..self.pos]);

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => out.push(self.parse_escape(start)?),
                Some(b) => {
                    return Err(self.error_here(ParseErrorKind::ControlCharacterInString(
                        char::from(b),
                    )))
                }
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedString,
                        Span::new(start, self.pos),
                    ))
                }
            }
        }
    }

    /// The cursor must be on the backslash.
    fn parse_escape(&mut self, string_start: usize) -> Result<char, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let Some(c) = self.current_char() else {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedString,
                Span::new(string_start, self.pos),
            ));
        };
        self.pos += c.len_utf8();

        Ok(match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => self.parse_unicode_escape(start)?,
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidEscape(other),
                    Span::new(start, self.pos),
                ))
            }
        })
    }

    /// Decodes the digits of a `\u` escape, combining a UTF-16 surrogate pair when the first
    /// escape is a high surrogate. The cursor must be just past the `u`.
    fn parse_unicode_escape(&mut self, start: usize) -> Result<char, ParseError> {
        let high = self.parse_hex4(start)?;
        let code = match high {
            0xD800..=0xDBFF => {
                if !self.src[self.pos..].starts_with("\\u") {
                    return Err(self.invalid_unicode(start));
                }
                self.pos += 2;
                let low = self.parse_hex4(start)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.invalid_unicode(start));
                }
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.invalid_unicode(start)),
            _ => u32::from(high),
        };
        char::from_u32(code).ok_or_else(|| self.invalid_unicode(start))
    }

    fn parse_hex4(&mut self, start: usize) -> Result<u16, ParseError> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|h| u16::from_str_radix(h, 16).ok());
        match digits {
            Some(unit) => {
                self.pos += 4;
                Ok(unit)
            }
            None => Err(self.invalid_unicode(start)),
        }
    }

    fn invalid_unicode(&self, start: usize) -> ParseError {
        ParseError::new(ParseErrorKind::InvalidUnicodeEscape, Span::new(start, self.pos))
    }

    /// Called on an opening bracket or brace.
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error_here(ParseErrorKind::NestingTooDeep {
                limit: self.options.max_depth,
            }));
        }
        self.pos += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if !self.eat(b']') {
            loop {
                items.push(self.parse_value()?);
                if self.after_element(b']')? {
                    break;
                }
            }
        }

        self.depth -= 1;
        Ok(Value::from(items))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut members = Object::new();

        self.skip_whitespace();
        if !self.eat(b'}') {
            loop {
                self.skip_whitespace();
                if self.peek() != Some(b'"') {
                    return Err(self.expected_here(ParseErrorKind::ExpectedKey));
                }
                let key = self.parse_string()?;

                self.skip_whitespace();
                if !self.eat(b':') {
                    return Err(self.expected_here(ParseErrorKind::ExpectedColon));
                }

                let value = self.parse_value()?;
                // Duplicate keys: the last one wins, at the position of the first.
                members.insert(key, value);

                if self.after_element(b'}')? {
                    break;
                }
            }
        }

        self.depth -= 1;
        Ok(Value::from(members))
    }

    /// Consumes the `,` or `close` that must follow an element. Returns whether the container
    /// ended.
    fn after_element(&mut self, close: u8) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b',') => {
                let comma = self.pos;
                self.pos += 1;
                self.skip_whitespace();
                if self.peek() == Some(close) {
                    return Err(ParseError::new(
                        ParseErrorKind::TrailingComma(char::from(close)),
                        Span::new(comma, comma + 1),
                    ));
                }
                Ok(false)
            }
            Some(b) if b == close => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.expected_here(ParseErrorKind::ExpectedCommaOrEnd(char::from(close)))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    fn err(src: &str) -> ParseError {
        parse(src).unwrap_err()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("null"), Ok(Value::null()));
        assert_eq!(parse("true"), Ok(Value::from(true)));
        assert_eq!(parse(" false "), Ok(Value::from(false)));
        assert_eq!(parse("-0"), Ok(Value::from(-0.0)));
        assert_eq!(parse("\"\""), Ok(Value::from("")));
    }

    #[test]
    fn test_error_spans() {
        assert_eq!(
            err("[1,]"),
            ParseError::new(ParseErrorKind::TrailingComma(']'), Span::new(2, 3))
        );
        assert_eq!(
            err("{\"a\" 1}"),
            ParseError::new(ParseErrorKind::ExpectedColon, Span::new(5, 6))
        );
        assert_eq!(
            err("[1 2]"),
            ParseError::new(ParseErrorKind::ExpectedCommaOrEnd(']'), Span::new(3, 4))
        );
        assert_eq!(
            err("nul"),
            ParseError::new(ParseErrorKind::InvalidLiteral { expected: "null" }, Span::new(0, 1))
        );
        assert_eq!(
            err("01"),
            ParseError::new(ParseErrorKind::LeadingZero, Span::new(0, 2))
        );
    }

    #[test]
    fn test_end_of_input() {
        assert_eq!(err("").kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err("   ").kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err("[").kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err("{\"a\":1").kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err("{\"a\"").kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err("\"abc").kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err("\"abc\\").kind, ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(err("'hi'").kind, ParseErrorKind::UnexpectedCharacter('\''));
        assert_eq!(err(".5").kind, ParseErrorKind::UnexpectedCharacter('.'));
        assert_eq!(
            err("é"),
            ParseError::new(ParseErrorKind::UnexpectedCharacter('é'), Span::new(0, 2))
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            parse(r#""\\\"\/\n\b\f\r\t""#),
            Ok(Value::from("\\\"/\n\u{8}\u{c}\r\t"))
        );
        assert_eq!(err(r#""\x""#).kind, ParseErrorKind::InvalidEscape('x'));
        assert_eq!(err(r#""\é""#).kind, ParseErrorKind::InvalidEscape('é'));
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(parse(r#""\u00e9""#), Ok(Value::from("é")));
        assert_eq!(parse(r#""\u00e9t\u00E9""#), Ok(Value::from("été")));
        assert_eq!(parse(r#""\ud83d\ude00""#), Ok(Value::from("😀")));
        assert_eq!(parse(r#""\u0000""#), Ok(Value::from("\u{0}")));
        for bad in [
            r#""\ud800""#,
            r#""\ud800x""#,
            r#""\ud800\u0041""#,
            r#""\udc00""#,
            r#""\u12""#,
            r#""\u+123""#,
            r#""\uzzzz""#,
        ] {
            assert_eq!(err(bad).kind, ParseErrorKind::InvalidUnicodeEscape, "{bad}");
        }
    }

    #[test]
    fn test_control_characters_must_be_escaped() {
        assert_eq!(
            err("\"a\nb\""),
            ParseError::new(ParseErrorKind::ControlCharacterInString('\n'), Span::new(2, 3))
        );
    }

    #[test]
    fn test_non_ascii_strings() {
        assert_eq!(parse("\"日本語\""), Ok(Value::from("日本語")));
        assert_eq!(parse("[\"ü\",\"ß\"]").unwrap().len(), Some(2));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("1.0e+5"), Ok(Value::from(100000.0)));
        assert_eq!(parse("0.04E2"), Ok(Value::from(4.0)));
        assert_eq!(parse("-12.5e-1"), Ok(Value::from(-1.25)));
        assert_eq!(parse("0"), Ok(Value::from(0)));
        assert_eq!(err("-").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(err("-a").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(err("1.").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(err("1e").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(err("1e+").kind, ParseErrorKind::InvalidNumber);
        assert_eq!(err("-01").kind, ParseErrorKind::LeadingZero);
        assert_eq!(err("1e400").kind, ParseErrorKind::NumberOutOfRange);
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            err("1 2"),
            ParseError::new(ParseErrorKind::TrailingCharacters, Span::new(2, 3))
        );
        assert!(parse("[1]  \n").is_ok());

        let lenient = ParseOptions::new().with_trailing_input(true);
        assert_eq!(parse_with_options("[1] garbage", lenient), Ok(parse("[1]").unwrap()));
        assert_eq!(parse_with_options("truex", lenient), Ok(Value::from(true)));
    }

    #[test]
    fn test_nesting_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(parse_with_options("[[1]]", options).is_ok());
        assert!(parse_with_options("[{}]", options).is_ok());
        assert_eq!(
            parse_with_options("[[[1]]]", options),
            Err(ParseError::new(
                ParseErrorKind::NestingTooDeep { limit: 2 },
                Span::new(2, 3)
            ))
        );
        assert!(parse_with_options("7", ParseOptions::new().with_max_depth(0)).is_ok());
        assert!(parse_with_options("[]", ParseOptions::new().with_max_depth(0)).is_err());
    }

    #[test]
    fn test_deep_input_is_rejected_not_overflowed() {
        let deep = "[".repeat(100_000);
        assert_eq!(
            err(&deep).kind,
            ParseErrorKind::NestingTooDeep {
                limit: crate::DEFAULT_MAX_DEPTH
            }
        );
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let v = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let Kind::Object(members) = v.kind() else {
            panic!("expected an object, got {v:?}");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members.get_index(0), Some((&"a".to_owned(), &Value::from(3))));
        assert_eq!(v.stringify(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn test_parse_or_null() {
        assert!(parse_or_null("{").is_null());
        assert_eq!(parse_or_null("[true]"), Value::from(vec![Value::from(true)]));
    }

    #[test]
    fn test_from_str() {
        let v: Value = "[1, 2]".parse().unwrap();
        assert_eq!(v.len(), Some(2));
        assert!("[1, 2".parse::<Value>().is_err());
    }
}
