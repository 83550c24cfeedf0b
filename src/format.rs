//! Display formatting: digit grouping for the primary line, size classes,
//! and tokenizing of the expression line.

use crate::entry::digit_count;
use crate::number::{is_special, DECIMAL_SEPARATOR};

/// Split a display value into runs of three integer digits, counted back
/// from the separator (or the end). The sign stays on the first run; the
/// separator, fraction and any exponent stay on the last one.
///
/// `"-1234567,891"` becomes `["-1", "234", "567,891"]`.
pub fn group_runs(text: &str) -> Vec<String> {
    if is_special(text) {
        return vec![text.to_owned()];
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(index) => unsigned.split_at(index),
        None => (unsigned, ""),
    };
    let (integer, fraction) = match mantissa.find(DECIMAL_SEPARATOR) {
        Some(index) => mantissa.split_at(index),
        None => (mantissa, ""),
    };

    let mut runs = Vec::with_capacity(integer.len() / 3 + 1);
    let lead = match integer.len() % 3 {
        0 => 3.min(integer.len()),
        n => n,
    };
    if lead > 0 {
        runs.push(integer[..lead].to_owned());
    }
    let mut index = lead;
    while index < integer.len() {
        runs.push(integer[index..index + 3].to_owned());
        index += 3;
    }

    if runs.is_empty() {
        runs.push(String::new());
    }
    runs[0].insert_str(0, sign);
    if let Some(last) = runs.last_mut() {
        last.push_str(fraction);
        last.push_str(exponent);
    }
    runs
}

/// Split the expression line on spaces.
pub fn expression_tokens(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Render size of the primary line. Each step past eight digits shrinks
/// the text; the last two also tighten the gap between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeClass {
    Full,
    Large,
    Medium,
    Small,
    Tiny,
}

impl SizeClass {
    pub fn for_text(text: &str) -> Self {
        match digit_count(text) {
            0..=8 => SizeClass::Full,
            9 => SizeClass::Large,
            10 => SizeClass::Medium,
            11 => SizeClass::Small,
            _ => SizeClass::Tiny,
        }
    }

    pub fn font_px(self) -> f32 {
        match self {
            SizeClass::Full => 48.0,
            SizeClass::Large => 42.0,
            SizeClass::Medium => 38.0,
            SizeClass::Small => 34.0,
            SizeClass::Tiny => 30.0,
        }
    }

    pub fn run_gap_px(self) -> f32 {
        match self {
            SizeClass::Full | SizeClass::Large | SizeClass::Medium => 9.0,
            SizeClass::Small => 6.0,
            SizeClass::Tiny => 4.0,
        }
    }

    /// Gap between runs in terminal columns.
    pub fn run_gap_columns(self) -> usize {
        if self.is_tight() {
            1
        } else {
            2
        }
    }

    pub fn is_tight(self) -> bool {
        self >= SizeClass::Small
    }
}
