//! The JSON value tree.
//!
//! A [`Value`] is an immutable handle to one node of the tree. Handles are reference counted
//! ([`Arc`]), so cloning one is cheap and the same subtree may hang off several parents. Nothing
//! hands out mutable access to a node once it is built, which is what makes a finished tree safe to
//! share between threads.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::AccessError;

/// Object members, in the order their keys were first inserted.
pub type Object = IndexMap<String, Value>;

/// The payload-free tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six JSON kinds together with their payloads. Match on [`Value::kind`] to handle every case
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Null,
    Bool(bool),
    /// Integers and fractions share one representation.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// Compared as a map: two objects with the same members in a different order are equal.
    Object(Object),
}

/// A shared, immutable JSON value.
///
/// Equality is structural, see [`Kind`]. Numbers compare with IEEE-754 `==`, so a `NaN` built
/// through [`From<f64>`] is not equal to itself.
#[derive(Clone)]
pub struct Value {
    node: Arc<Kind>,
}

impl Value {
    pub fn null() -> Self {
        Value::from(Kind::Null)
    }

    pub fn kind(&self) -> &Kind {
        &self.node
    }

    pub fn value_type(&self) -> ValueType {
        match self.kind() {
            Kind::Null => ValueType::Null,
            Kind::Bool(_) => ValueType::Boolean,
            Kind::Number(_) => ValueType::Number,
            Kind::String(_) => ValueType::String,
            Kind::Array(_) => ValueType::Array,
            Kind::Object(_) => ValueType::Object,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind(), Kind::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.kind(), Kind::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind(), Kind::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind(), Kind::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind(), Kind::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind(), Kind::Object(_))
    }

    /// Structural equality; the same as `==`.
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }

    /// Whether both handles point at the very same node, as opposed to merely equal ones.
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    /// Number of elements or members, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self.kind() {
            Kind::Array(items) => Some(items.len()),
            Kind::Object(members) => Some(members.len()),
            _ => None,
        }
    }

    /// True for `[]` and `{}` only.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    // Optional accessors. These never fail; a different variant yields `None`.

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind() {
            Kind::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number truncated towards zero, saturating at the bounds of `i32`.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_f64().map(|n| n as i32)
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|n| n as f32)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind() {
            Kind::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.kind() {
            Kind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self.kind() {
            Kind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self.kind() {
            Kind::Object(members) => Some(members),
            _ => None,
        }
    }

    // Typed accessors. A different variant is an `AccessError::TypeMismatch`.

    pub fn bool_value(&self) -> Result<bool, AccessError> {
        self.as_bool().ok_or_else(|| self.mismatch(ValueType::Boolean))
    }

    /// See [`Value::as_i32`] for how the number is narrowed.
    pub fn int_value(&self) -> Result<i32, AccessError> {
        self.as_i32().ok_or_else(|| self.mismatch(ValueType::Number))
    }

    pub fn float_value(&self) -> Result<f32, AccessError> {
        self.as_f32().ok_or_else(|| self.mismatch(ValueType::Number))
    }

    pub fn double_value(&self) -> Result<f64, AccessError> {
        self.as_f64().ok_or_else(|| self.mismatch(ValueType::Number))
    }

    pub fn string_value(&self) -> Result<&str, AccessError> {
        self.as_str().ok_or_else(|| self.mismatch(ValueType::String))
    }

    pub fn array_items(&self) -> Result<&[Value], AccessError> {
        self.as_array().ok_or_else(|| self.mismatch(ValueType::Array))
    }

    pub fn object_items(&self) -> Result<&Object, AccessError> {
        self.as_object().ok_or_else(|| self.mismatch(ValueType::Object))
    }

    // Defaulted accessors. A different variant yields `default`.

    pub fn bool_value_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    pub fn int_value_or(&self, default: i32) -> i32 {
        self.as_i32().unwrap_or(default)
    }

    pub fn float_value_or(&self, default: f32) -> f32 {
        self.as_f32().unwrap_or(default)
    }

    pub fn double_value_or(&self, default: f64) -> f64 {
        self.as_f64().unwrap_or(default)
    }

    pub fn string_value_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_str().unwrap_or(default)
    }

    /// Look up an array element by position or an object member by key.
    ///
    /// ```
    /// # use arbor::parse;
    /// let doc = parse(r#"{"fuga": [1.0e+5, 0.04E2]}"#).unwrap();
    /// assert_eq!(doc.get("fuga").unwrap().get(1).unwrap().double_value(), Ok(4.0));
    /// assert!(doc.get(0).is_err());
    /// ```
    pub fn get<I: Index>(&self, index: I) -> Result<&Value, AccessError> {
        index.index_into(self)
    }

    fn mismatch(&self, expected: ValueType) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.value_type(),
        }
    }
}

/// Something that can select a child of a [`Value`]: a `usize` position in an array, or a `str`
/// key in an object. Sealed.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Value) -> Result<&'v Value, AccessError>;
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Result<&'v Value, AccessError> {
        let items = v.array_items()?;
        items.get(*self).ok_or(AccessError::IndexOutOfRange {
            index: *self,
            len: items.len(),
        })
    }
}

impl Index for str {
    fn index_into<'v>(&self, v: &'v Value) -> Result<&'v Value, AccessError> {
        v.object_items()?
            .get(self)
            .ok_or_else(|| AccessError::KeyNotFound(self.to_owned()))
    }
}

impl Index for String {
    fn index_into<'v>(&self, v: &'v Value) -> Result<&'v Value, AccessError> {
        self.as_str().index_into(v)
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_into<'v>(&self, v: &'v Value) -> Result<&'v Value, AccessError> {
        (**self).index_into(v)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.kind(), f)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl From<Kind> for Value {
    fn from(kind: Kind) -> Self {
        Value {
            node: Arc::new(kind),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::null()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::from(Kind::Bool(b))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::from(Kind::Number(n))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<i64> for Value {
    /// Magnitudes above 2^53 lose precision.
    fn from(n: i64) -> Self {
        Value::from(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::from(Kind::String(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::from(Kind::String(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::from(s.as_str())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::from(Kind::Array(items))
    }
}

/// Clones the element handles, not the subtrees behind them.
impl From<&[Value]> for Value {
    fn from(items: &[Value]) -> Self {
        Value::from(items.to_vec())
    }
}

impl From<Object> for Value {
    fn from(members: Object) -> Self {
        Value::from(Kind::Object(members))
    }
}

/// Clones the member handles, not the subtrees behind them.
impl From<&Object> for Value {
    fn from(members: &Object) -> Self {
        Value::from(members.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or_else(Value::null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Later duplicates of a key replace the earlier value but keep its position.
impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::from(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect::<Object>(),
        )
    }
}
