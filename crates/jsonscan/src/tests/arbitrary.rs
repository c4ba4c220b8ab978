use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Number, Value};

/// A finite double; JSON has no spelling for NaN or the infinities.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(pub f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

/// Any JSON document, as `serde_json` models it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JsonDoc(pub Value);

fn scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 6 {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::Number(i64::arbitrary(g).into()),
        3 => Value::Number(u64::arbitrary(g).into()),
        4 => Number::from_f64(JsonNumber::arbitrary(g).0).map_or(Value::Null, Value::Number),
        _ => Value::String(String::arbitrary(g)),
    }
}

impl Arbitrary for JsonDoc {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 | 1 => scalar(g),
                2 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        Self(gen_val(g, depth))
    }
}

/// A run of JSON whitespace.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Blank(pub String);

impl Arbitrary for Blank {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 5;
        let blanks: Vec<char> = (0..len)
            .map(|_| *g.choose(&[' ', '\t', '\n', '\r']).unwrap_or(&' '))
            .collect();
        Self(blanks.into_iter().collect())
    }
}
