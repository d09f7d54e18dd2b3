use super::Conversion;
use crate::words::{INVALID_NUMBER, ZERO};

const TOO_LARGE: &str = "Value too large for precise conversion";
const FAILED: &str = "Conversion failed";
const RANGE_TOO_LARGE: &str = "Value too large";
const RANGE_FAILED: &str = "Failed";

/// `"<original> → <converted> (<words>)"`; words are left out when they
/// carry no information.
pub(super) fn single(original: &str, conversion: &Conversion) -> String {
    match conversion {
        Conversion::Converted { display, words, .. } => {
            if words.is_empty() || words == ZERO || words == INVALID_NUMBER {
                format!("{original} → {display}")
            } else {
                format!("{original} → {display} ({words})")
            }
        }
        Conversion::TooLarge => format!("{original} → {TOO_LARGE}"),
        Conversion::Failed { .. } => format!("{original} → {FAILED}"),
    }
}

/// `"<original> → <c1>–<c2> (<w1> to <w2>)"`; each end that did not convert
/// shows a short status and the word range is dropped.
pub(super) fn range(original: &str, first: &Conversion, second: &Conversion) -> String {
    let head = format!("{original} → {}–{}", range_end(first), range_end(second));
    match (first, second) {
        (
            Conversion::Converted { words: w1, .. },
            Conversion::Converted { words: w2, .. },
        ) => format!("{head} ({w1} to {w2})"),
        _ => head,
    }
}

fn range_end(conversion: &Conversion) -> &str {
    match conversion {
        Conversion::Converted { display, .. } => display,
        Conversion::TooLarge => RANGE_TOO_LARGE,
        Conversion::Failed { .. } => RANGE_FAILED,
    }
}
