use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{Kind, Value};

/// Hands the tree to any `serde` data format. Non-finite numbers serialize as unit, which most
/// formats (JSON included) write as `null`, matching [`Value::stringify`].
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind() {
            Kind::Null => serializer.serialize_unit(),
            Kind::Bool(b) => serializer.serialize_bool(*b),
            Kind::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Kind::Number(_) => serializer.serialize_unit(),
            Kind::String(s) => serializer.serialize_str(s),
            Kind::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Kind::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, item) in members {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn serializes_like_stringify() {
        let v = parse(r#"{"b":[1.5,"x\"y",null,true],"a":{}}"#).unwrap();
        let via_serde = serde_json::to_string(&v).unwrap();
        assert_eq!(via_serde, r#"{"b":[1.5,"x\"y",null,true],"a":{}}"#);
        assert_eq!(parse(&via_serde).unwrap(), v);
    }

    #[test]
    fn non_finite_numbers_become_null() {
        let v = crate::Value::from(f64::INFINITY);
        assert_eq!(serde_json::to_string(&v).unwrap(), "null");
    }
}
