// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Natural sort keys — "page2" orders before "page10".
//
// A name is split into alternating runs of decimal digits and non-digits.
// Digit runs compare by numeric value, text runs compare lower-cased. Any
// Unicode decimal digit counts, so full-width "１０" sorts as ten.

use std::cmp::Ordering;

/// One run of a natural sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPart {
    /// A run of digits. Stored without leading zeros so that runs of any
    /// length compare by value without overflowing an integer type.
    Number(String),
    /// A run of non-digit characters, lower-cased.
    Text(String),
}

impl KeyPart {
    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Text(_) => 1,
        }
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Cannot happen for two keys built from names that agree up to
            // this point, but the ordering must still be total.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key produced by [`natural_key`]. Compares element-wise, left to right.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(pub Vec<KeyPart>);

/// Build the natural sort key for `name`.
///
/// Mirrors splitting on a capturing `(\d+)` pattern: the key always starts
/// with a (possibly empty) text run, so digit runs line up at the same
/// positions across names.
pub fn natural_key(name: &str) -> NaturalKey {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut digits = String::new();

    for ch in name.chars() {
        if let Some(value) = decimal_digit(ch) {
            if digits.is_empty() {
                parts.push(KeyPart::Text(std::mem::take(&mut text).to_lowercase()));
            }
            digits.push(char::from(b'0' + value));
        } else {
            if !digits.is_empty() {
                parts.push(number_part(&std::mem::take(&mut digits)));
            }
            text.push(ch);
        }
    }

    if !digits.is_empty() {
        parts.push(number_part(&digits));
    }
    parts.push(KeyPart::Text(text.to_lowercase()));

    NaturalKey(parts)
}

/// First code point of every block of ten Unicode decimal digits (general
/// category Nd), ascending.
const DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Value of `ch` if it is a decimal digit in any script.
fn decimal_digit(ch: char) -> Option<u8> {
    if ch.is_ascii_digit() {
        return Some(ch as u8 - b'0');
    }
    if ch.is_ascii() || !ch.is_numeric() {
        return None;
    }
    let code = u32::from(ch);
    let block = DIGIT_ZEROS.partition_point(|&zero| zero <= code).checked_sub(1)?;
    let offset = code - DIGIT_ZEROS[block];
    (offset < 10).then_some(offset as u8)
}

fn number_part(digits: &str) -> KeyPart {
    let trimmed = digits.trim_start_matches('0');
    KeyPart::Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
}

/// Sort `items` in natural order of the string returned by `name_of`.
///
/// The sort is stable, so names with equal keys ("a01" and "a1") keep their
/// input order.
pub fn natural_sort_by_key<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| natural_key(name_of(item)));
}
