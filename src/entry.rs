//! Editing of the numeral under construction.
//!
//! These are plain text transformations; the engine decides which value
//! (current entry or saved result) they are applied to.

use crate::number::{is_special, DECIMAL_SEPARATOR};

/// Most digits a typed numeral may hold, not counting sign or separator.
pub const MAX_DIGITS: usize = 11;

pub fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Append a digit. A lone zero is replaced, keeping its sign.
/// Returns `None` when the numeral is already full.
pub fn push_digit(text: &str, digit: u8) -> Option<String> {
    let digit = char::from(b'0' + digit);
    match text {
        "0" => Some(digit.to_string()),
        "-0" => Some(format!("-{}", digit)),
        _ if is_special(text) => Some(digit.to_string()),
        _ if digit_count(text) >= MAX_DIGITS => None,
        _ => {
            let mut numeral = text.to_owned();
            numeral.push(digit);
            Some(numeral)
        }
    }
}

/// Append the decimal separator unless one is already there.
pub fn push_separator(text: &str) -> String {
    if is_special(text) {
        return format!("0{}", DECIMAL_SEPARATOR);
    }
    if text.contains(DECIMAL_SEPARATOR) {
        return text.to_owned();
    }
    format!("{}{}", text, DECIMAL_SEPARATOR)
}

pub fn toggle_sign(text: &str) -> String {
    if text == crate::number::ERROR {
        return text.to_owned();
    }
    match text.strip_prefix('-') {
        Some(positive) => positive.to_owned(),
        None => format!("-{}", text),
    }
}

/// Remove the last character, falling back to `0` when nothing meaningful is left.
pub fn backspace(text: &str) -> String {
    if is_special(text) {
        return "0".to_owned();
    }
    let mut numeral = text.to_owned();
    numeral.pop();
    match numeral.as_str() {
        "" | "-" | "-0," => "0".to_owned(),
        _ => numeral,
    }
}
