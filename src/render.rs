//! Paints the two display lines as coloured terminal runs.

use colored::*;

use crate::config::{Palette, Rgb};
use crate::engine::Calculator;
use crate::number::{is_special, DECIMAL_SEPARATOR};

fn paint(text: &str, colour: Rgb) -> ColoredString {
    text.truecolor(colour.0, colour.1, colour.2)
}

/// The result line: grouped runs separated by the gap of the current size class.
pub fn primary_line(calc: &Calculator, colours: &Palette) -> Vec<ColoredString> {
    let gap = " ".repeat(calc.size_class().run_gap_columns());
    let mut result = Vec::new();

    for (index, run) in calc.primary_display().iter().enumerate() {
        if index > 0 {
            result.push(gap.as_str().normal());
        }
        result.extend(paint_run(run, colours));
    }
    result
}

fn paint_run(run: &str, colours: &Palette) -> Vec<ColoredString> {
    if is_special(run) {
        return vec![paint(run, colours.special)];
    }

    let mut result = Vec::new();
    let digits = match run.strip_prefix('-') {
        Some(rest) => {
            result.push(paint("-", colours.sign));
            rest
        }
        None => run,
    };
    match digits.split_once(DECIMAL_SEPARATOR) {
        Some((integer, fraction)) => {
            result.push(paint(integer, colours.integer));
            result.push(paint(&DECIMAL_SEPARATOR.to_string(), colours.separator));
            if !fraction.is_empty() {
                result.push(paint(fraction, colours.fraction));
            }
        }
        None => result.push(paint(digits, colours.integer)),
    }
    result
}

/// The expression line: operands in the expression colour, everything else
/// in the operator colour.
pub fn secondary_line(calc: &Calculator, colours: &Palette) -> Vec<ColoredString> {
    let mut result = Vec::new();

    for (index, token) in calc.secondary_display().iter().enumerate() {
        if index > 0 {
            result.push(" ".normal());
        }
        let colour = if is_operand(token) {
            colours.expression
        } else {
            colours.operator
        };
        result.push(paint(token, colour));
    }
    result
}

fn is_operand(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    is_special(token)
        || (!unsigned.is_empty()
            && unsigned
                .chars()
                .all(|c| c.is_ascii_digit() || c == DECIMAL_SEPARATOR))
}

/// Strip the colours back off, for comparisons.
pub fn plain(coloured: &[ColoredString]) -> String {
    let mut result = String::new();
    for coloured_string in coloured {
        result.push_str(coloured_string);
    }
    result
}
