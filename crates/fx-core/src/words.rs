//! English number words in Western (thousand/million) or South-Asian
//! (lakh/crore) grouping.
//!
//! Values are rounded half-up to two places before splitting, then the
//! integer part is spelled chunk by chunk and a non-zero fraction is
//! appended after " and ". Western fractions are bare numbers; South-Asian
//! fractions carry " Paisa".

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::convert::round_money;

pub const ZERO: &str = "Zero";
pub const INVALID_NUMBER: &str = "Invalid Number";

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];
const WESTERN_SCALES: [&str; 10] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
    "Sextillion",
    "Septillion",
    "Octillion",
];
const INDIAN_SCALES: [&str; 9] = [
    "", "Thousand", "Lakh", "Crore", "Arab", "Kharab", "Neel", "Padma", "Shankh",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingSystem {
    Western,
    /// Lakh/crore grouping: 3 digits, then pairs.
    SouthAsian,
}

impl NumberingSystem {
    pub fn for_currency(code: &str) -> Self {
        if code.eq_ignore_ascii_case("INR") {
            NumberingSystem::SouthAsian
        } else {
            NumberingSystem::Western
        }
    }
}

/// Words for `value` in the numbering system of `target`.
pub fn to_words(value: f64, target: &str) -> String {
    match decimal_from_f64(value) {
        Some(d) => to_words_decimal(d, target),
        None => INVALID_NUMBER.to_string(),
    }
}

pub fn to_words_decimal(value: Decimal, target: &str) -> String {
    render(value, NumberingSystem::for_currency(target))
}

pub fn number_to_western_words(value: f64) -> String {
    decimal_from_f64(value).map_or_else(
        || INVALID_NUMBER.to_string(),
        |d| render(d, NumberingSystem::Western),
    )
}

pub fn number_to_indian_words(value: f64) -> String {
    decimal_from_f64(value).map_or_else(
        || INVALID_NUMBER.to_string(),
        |d| render(d, NumberingSystem::SouthAsian),
    )
}

/// `None` for NaN, infinities, negatives and values outside decimal range.
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

pub fn render(value: Decimal, system: NumberingSystem) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        return INVALID_NUMBER.to_string();
    }
    let rounded = round_money(value);
    let Some(integer) = rounded.trunc().to_u128() else {
        return INVALID_NUMBER.to_string();
    };
    let cents = ((rounded - rounded.trunc()) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);

    let mut words = match system {
        NumberingSystem::Western => western_integer(integer),
        NumberingSystem::SouthAsian => indian_integer(integer),
    };
    if cents > 0 {
        let fraction = match system {
            NumberingSystem::Western => two_digit(cents),
            NumberingSystem::SouthAsian => format!("{} Paisa", two_digit(cents)),
        };
        if !words.is_empty() {
            words.push_str(" and ");
        }
        words.push_str(&fraction);
    }

    if words.is_empty() {
        ZERO.to_string()
    } else {
        words
    }
}

fn two_digit(n: u32) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        _ if n % 10 == 0 => TENS[(n / 10) as usize].to_string(),
        _ => format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize]),
    }
}

fn three_digit(n: u32) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => two_digit(rest),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, r) => format!("{} Hundred {}", ONES[h as usize], two_digit(r)),
    }
}

fn western_integer(n: u128) -> String {
    let mut parts = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        if scale == WESTERN_SCALES.len() - 1 {
            // top scale absorbs every remaining digit
            parts.push(format!("{} {}", western_integer(rest), WESTERN_SCALES[scale]));
            break;
        }
        let chunk = (rest % 1000) as u32;
        if chunk != 0 {
            let mut words = three_digit(chunk);
            if scale > 0 {
                words.push(' ');
                words.push_str(WESTERN_SCALES[scale]);
            }
            parts.push(words);
        }
        rest /= 1000;
        scale += 1;
    }
    parts.reverse();
    parts.join(" ")
}

fn indian_integer(n: u128) -> String {
    let mut parts = Vec::new();
    let last = (n % 1000) as u32;
    if last != 0 {
        parts.push(three_digit(last));
    }
    let mut rest = n / 1000;
    let mut scale = 1;
    while rest > 0 {
        if scale == INDIAN_SCALES.len() - 1 {
            parts.push(format!("{} {}", indian_integer(rest), INDIAN_SCALES[scale]));
            break;
        }
        let chunk = (rest % 100) as u32;
        if chunk != 0 {
            parts.push(format!("{} {}", two_digit(chunk), INDIAN_SCALES[scale]));
        }
        rest /= 100;
        scale += 1;
    }
    parts.reverse();
    parts.join(" ")
}
