/*!
Path digestion: turning the raw RIS Live AS path into a flat sequence of AS numbers.

RIS Live encodes an AS path as a JSON array where each element is either an AS number or, for an
AS_SET segment, an array of AS numbers:

```text
[2497, 6453, 18705, 26281, [13340]]
```

Digestion flattens AS sets one level deep, in place, keeping the order in which their members were
sent. Any element that is not an AS number fails the whole path.
*/
use crate::error::DigestError;
use serde_json::{Number, Value};

/// A single top-level element of a raw path, after its leaves have been checked.
enum PathSegment {
    Asn(i64),
    AsSet(Vec<i64>),
}

impl PathSegment {
    fn from_value(position: usize, value: &Value) -> Result<PathSegment, DigestError> {
        match value {
            Value::Number(n) => Ok(PathSegment::Asn(number_to_i64(position, n)?)),
            Value::Array(members) => members
                .iter()
                .map(|member| match member {
                    Value::Number(n) => number_to_i64(position, n),
                    Value::Array(_) => Err(DigestError::NestedAsSet { position }),
                    other => Err(DigestError::NotANumber {
                        position,
                        value: other.to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PathSegment::AsSet),
            other => Err(DigestError::NotANumber {
                position,
                value: other.to_string(),
            }),
        }
    }
}

/// JSON numbers may carry a fractional encoding (`57695.0`); the fraction is truncated.
fn number_to_i64(position: usize, n: &Number) -> Result<i64, DigestError> {
    if let Some(v) = n.as_i64() {
        return Ok(v);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.trunc() >= i64::MIN as f64 && f.trunc() <= i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        _ => Err(DigestError::OutOfRange {
            position,
            value: n.to_string(),
        }),
    }
}

/// 4-byte AS numbers above `i32::MAX` keep their bit pattern (4200000000 is stored as -94967296).
fn to_i32(position: usize, asn: i64) -> Result<i32, DigestError> {
    i32::try_from(asn)
        .or_else(|_| u32::try_from(asn).map(|v| v as i32))
        .map_err(|_| DigestError::OutOfRange {
            position,
            value: asn.to_string(),
        })
}

/// Digest a raw RIS Live path into an ordered sequence of AS numbers.
///
/// # Example
///
/// ```rust
/// use bgpkit_rislive::parser::digest::digest_path;
/// use serde_json::json;
///
/// let raw = json!([2497, 6453, 18705, 26281, [13340]]);
/// let path = digest_path(raw.as_array().unwrap()).unwrap();
/// assert_eq!(path, vec![2497, 6453, 18705, 26281, 13340]);
/// ```
pub fn digest_path(raw: &[Value]) -> Result<Vec<i32>, DigestError> {
    let mut digested = Vec::with_capacity(raw.len());
    for (position, value) in raw.iter().enumerate() {
        match PathSegment::from_value(position, value)? {
            PathSegment::Asn(asn) => digested.push(to_i32(position, asn)?),
            PathSegment::AsSet(members) => {
                for asn in members {
                    digested.push(to_i32(position, asn)?);
                }
            }
        }
    }
    Ok(digested)
}
