#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonscan::{
    JsonState, PortableEscaper, QuoteOptions, Scanner, TokenState, decode_value, quote_with,
    skip_value, unescape,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size {
            let limit = max_size - prefix;

            prefix += append_whitespace(&mut data[prefix..], limit);
            prefix += append_value(&mut data[prefix..], size, limit);
            prefix += append_whitespace(&mut data[prefix..], limit);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1..=8 JSON whitespace bytes to `buf`, never exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n = rng.random_range(1..=limit.min(8));
        for b in &mut buf[..n] {
            *b = WS_TABLE[rng.random_range(0..WS_TABLE.len())][0];
        }
        n
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(u.arbitrary::<i64>()?.into()),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Every scanning entry point must stay in bounds on arbitrary input.
fn scan(data: &[u8], start: usize) {
    if let Ok(span) = skip_value(data, start) {
        assert!(start <= span.start && span.start < span.end && span.end <= data.len());
    }
    if let Ok((end, state)) = decode_value(data, start) {
        assert!(start < end && end <= data.len());
        if let JsonState::String { start: content, .. } = state {
            assert!(content < end);
        }
    }

    let mut s = Scanner::with_position(data, start);
    while let Ok(token) = s.peek() {
        let before = s.position();
        let moved = match token {
            TokenState::Invalid => break,
            TokenState::Comma
            | TokenState::Colon
            | TokenState::EndArr
            | TokenState::EndObj
            | TokenState::Obj
            | TokenState::Arr => s.expect(token).is_ok(),
            _ => s.decode_value().is_ok(),
        };
        if !moved {
            assert_eq!(s.position(), before);
            break;
        }
        assert!(s.position() > before && s.position() <= data.len());
    }
}

/// Quoting with any starting capacity yields text that decodes back.
fn quote_round_trip(text: &str, flags: u8, capacity: usize) {
    let escaper = PortableEscaper::new(QuoteOptions {
        escape_html: flags & 1 != 0,
    });
    let mut out = Vec::with_capacity(capacity);
    quote_with(&escaper, &mut out, text.as_bytes());
    let decoded = unescape(&out).expect("quoted text must unescape");
    assert_eq!(decoded, text.as_bytes());
}

fn scanner(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as usize;
    let data = &data[HEADER..];
    if data.is_empty() {
        return;
    }

    scan(data, 0);
    scan(data, seed % data.len());

    // Anything serde_json accepts is one value followed by whitespace.
    if serde_json::from_slice::<Value>(data).is_ok() {
        let span = skip_value(data, 0).expect("valid document must skip");
        assert!(data[span.end..].iter().all(u8::is_ascii_whitespace));
    }

    let text = String::from_utf8_lossy(data);
    quote_round_trip(&text, flags, seed % 64);
}

fuzz_target!(|data: &[u8]| scanner(data));
