//! The calculator engine: one instance per calculator window.
//!
//! Every command mutates the state and recomputes both display lines before
//! returning, so callers always observe a consistent display.

use tracing::{debug, trace, warn};

use crate::entry;
use crate::format::{self, SizeClass};
use crate::keys::Key;
use crate::number::{format_value, parse_value, tidy};
use crate::operator::Operator;

/// A completed evaluation, as shown on the expression and result lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

#[derive(Debug, Clone)]
pub struct Calculator {
    /// Numeral being typed.
    entry: String,
    /// Result of the last evaluation while it is still live for chaining.
    saved: Option<String>,
    pending: Option<Operator>,
    first: String,
    second: String,
    expression: String,
    result: String,
    history: Vec<HistoryEntry>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator {
            entry: "0".to_owned(),
            saved: None,
            pending: None,
            first: String::new(),
            second: String::new(),
            expression: String::new(),
            result: "0".to_owned(),
            history: Vec::new(),
        }
    }

    pub fn press(&mut self, key: Key) {
        trace!(?key, "key pressed");
        match key {
            Key::Digit(digit) => self.press_digit(digit),
            Key::Decimal => self.press_decimal(),
            Key::Operator(op) => self.press_operator(op),
            Key::Equals => self.press_equals(),
            Key::ClearEntry => self.press_clear_entry(),
            Key::ClearAll => self.press_clear_all(),
            Key::Backspace => self.press_backspace(),
            Key::ToggleSign => self.press_toggle_sign(),
        }
    }

    pub fn press_all(&mut self, keys: &[Key]) {
        for &key in keys {
            self.press(key);
        }
    }

    pub fn press_digit(&mut self, digit: u8) {
        if digit > 9 {
            warn!(digit, "ignoring digit outside 0-9");
            return;
        }
        if self.saved.take().is_some() {
            self.entry = "0".to_owned();
        }
        match entry::push_digit(&self.entry, digit) {
            Some(numeral) => self.entry = numeral,
            None => debug!(entry = %self.entry, "entry full, digit rejected"),
        }
        self.result = self.entry.clone();
    }

    pub fn press_decimal(&mut self) {
        if self.saved.take().is_some() {
            self.entry = "0".to_owned();
        }
        self.entry = entry::push_separator(&self.entry);
        self.result = self.entry.clone();
    }

    /// Flip the sign of the shown value, which is the saved result right
    /// after an evaluation.
    pub fn press_toggle_sign(&mut self) {
        let active = match self.saved.as_mut() {
            Some(saved) => saved,
            None => &mut self.entry,
        };
        *active = entry::toggle_sign(active);
        self.result = active.clone();
    }

    pub fn press_backspace(&mut self) {
        let active = match self.saved.as_mut() {
            Some(saved) => saved,
            None => &mut self.entry,
        };
        *active = entry::backspace(active);
        self.result = active.clone();
    }

    pub fn press_operator(&mut self, op: Operator) {
        debug!(?op, pending = ?self.pending, "operator pressed");
        match op {
            Operator::Inverse | Operator::Square | Operator::SquareRoot => self.evaluate_unary(op),
            Operator::Percent => self.percent(),
            Operator::Division
            | Operator::Multiplication
            | Operator::Subtraction
            | Operator::Addition => self.begin_binary(op),
        }
    }

    pub fn press_equals(&mut self) {
        let value = match self.pending.take() {
            Some(Operator::Percent) => {
                self.expression = "0 =".to_owned();
                "0".to_owned()
            }
            Some(op) if op.is_binary() => {
                self.second = tidy(self.active());
                let value = format_value(
                    op.apply_binary(parse_value(&self.first), parse_value(&self.second)),
                );
                self.expression = format!("{} {} {} =", self.first, op.symbol(), self.second);
                self.record(&value);
                value
            }
            Some(op) => unreachable!("unary operator {:?} left pending", op),
            None => {
                let value = tidy(self.active());
                self.expression = format!("{} =", value);
                value
            }
        };
        debug!(expression = %self.expression, result = %value, "equals");
        self.result = value.clone();
        self.saved = Some(value);
        self.entry = "0".to_owned();
    }

    /// Reset the numeral being typed; a pending operation survives.
    pub fn press_clear_entry(&mut self) {
        self.entry = "0".to_owned();
        self.saved = None;
        self.result = self.entry.clone();
    }

    /// Reset everything except the session history.
    pub fn press_clear_all(&mut self) {
        let history = std::mem::take(&mut self.history);
        *self = Calculator {
            history,
            ..Calculator::new()
        };
    }

    fn active(&self) -> &str {
        self.saved.as_deref().unwrap_or(&self.entry)
    }

    fn evaluate_unary(&mut self, op: Operator) {
        let operand = tidy(self.active());
        let value = format_value(op.apply_unary(parse_value(&operand)));
        self.expression = format!("{}( {} ) =", op.symbol(), operand);
        debug!(expression = %self.expression, result = %value, "unary evaluated");
        self.record(&value);
        self.result = value.clone();
        self.saved = Some(value);
    }

    fn begin_binary(&mut self, op: Operator) {
        self.first = tidy(self.active());
        self.pending = Some(op);
        self.expression = format!("{} {}", self.first, op.symbol());
        self.entry = "0".to_owned();
        self.saved = None;
        self.result = self.entry.clone();
    }

    fn percent(&mut self) {
        match self.pending {
            Some(op) if op != Operator::Percent => {
                let current = tidy(self.active());
                let value = format_value(
                    Operator::Percent.apply_binary(parse_value(&self.first), parse_value(&current)),
                );
                self.expression = format!("{} {} {}", self.first, op.symbol(), value);
                self.result = value.clone();
                self.saved = Some(value);
            }
            _ => {
                // nothing to take a percentage of
                self.first = tidy(self.active());
                self.pending = Some(Operator::Percent);
                self.expression = "0".to_owned();
                self.entry = "0".to_owned();
                self.saved = None;
                self.result = "0".to_owned();
            }
        }
    }

    fn record(&mut self, result: &str) {
        self.history.push(HistoryEntry {
            expression: self.expression.clone(),
            result: result.to_owned(),
        });
    }

    /// Grouped runs of the result line.
    pub fn primary_display(&self) -> Vec<String> {
        format::group_runs(&self.result)
    }

    /// Tokens of the expression line.
    pub fn secondary_display(&self) -> Vec<String> {
        format::expression_tokens(&self.expression)
    }

    pub fn size_class(&self) -> SizeClass {
        SizeClass::for_text(&self.result)
    }

    pub fn current_entry(&self) -> &str {
        &self.entry
    }

    pub fn saved_result(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    pub fn pending_operation(&self) -> Option<Operator> {
        self.pending
    }

    pub fn first_operand(&self) -> &str {
        &self.first
    }

    pub fn second_operand(&self) -> &str {
        &self.second
    }

    pub fn expression_text(&self) -> &str {
        &self.expression
    }

    pub fn result_text(&self) -> &str {
        &self.result
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::parse_line;

    fn run(line: &str) -> Calculator {
        let mut calc = Calculator::new();
        calc.press_all(&parse_line(line).unwrap());
        calc
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.primary_display(), ["0"]);
        assert!(calc.secondary_display().is_empty());
        assert_eq!(calc.pending_operation(), None);
        assert_eq!(calc.saved_result(), None);
    }

    #[test]
    fn test_addition() {
        let calc = run("7 + 5 =");
        assert_eq!(calc.secondary_display(), ["7", "+", "5", "="]);
        assert_eq!(calc.primary_display(), ["12"]);
        assert_eq!(calc.saved_result(), Some("12"));
        assert_eq!(calc.current_entry(), "0");
        assert_eq!(calc.second_operand(), "5");
        assert_eq!(calc.pending_operation(), None);
    }

    #[test]
    fn test_binary_operator_restarts_entry() {
        let calc = run("1234 +");
        assert_eq!(calc.expression_text(), "1234 +");
        assert_eq!(calc.primary_display(), ["0"]);
        assert_eq!(calc.current_entry(), "0");
        assert_eq!(calc.pending_operation(), Some(Operator::Addition));
    }

    #[test]
    fn test_square_root() {
        let calc = run("9 sqrt");
        assert_eq!(calc.secondary_display(), ["√(", "9", ")", "="]);
        assert_eq!(calc.expression_text(), "√( 9 ) =");
        assert_eq!(calc.primary_display(), ["3"]);
        assert_eq!(calc.saved_result(), Some("3"));
    }

    #[test]
    fn test_unary_leaves_pending_operation_alone() {
        let calc = run("7 + 9 sqrt");
        assert_eq!(calc.pending_operation(), Some(Operator::Addition));
        assert_eq!(calc.first_operand(), "7");
        let mut calc = calc;
        calc.press_equals();
        assert_eq!(calc.expression_text(), "7 + 3 =");
        assert_eq!(calc.result_text(), "10");
    }

    #[test]
    fn test_unary_chaining() {
        let calc = run("2 sqr sqr");
        assert_eq!(calc.expression_text(), "sqr( 4 ) =");
        assert_eq!(calc.result_text(), "16");
        let calc = run("4 1/x");
        assert_eq!(calc.expression_text(), "1/( 4 ) =");
        assert_eq!(calc.result_text(), "0,25");
    }

    #[test]
    fn test_edit_keys_after_binary_operator_act_on_shown_value() {
        let calc = run("7 + sqrt");
        assert_eq!(calc.expression_text(), "√( 0 ) =");
        assert_eq!(calc.primary_display(), ["0"]);
        assert_eq!(calc.pending_operation(), Some(Operator::Addition));

        let mut calc = run("7 +");
        assert_eq!(calc.result_text(), "0");
        calc.press_toggle_sign();
        assert_eq!(calc.result_text(), "-0");
        assert_eq!(calc.current_entry(), "-0");
        calc.press_digit(2);
        calc.press_equals();
        assert_eq!(calc.expression_text(), "7 + -2 =");
        assert_eq!(calc.result_text(), "5");
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(run("5 / 0 =").primary_display(), ["Infinity"]);
        assert_eq!(run("5 neg / 0 =").primary_display(), ["-Infinity"]);
        assert_eq!(run("0 / 0 =").primary_display(), ["Error"]);
        assert_eq!(run("0 1/x").primary_display(), ["Infinity"]);
    }

    #[test]
    fn test_clear_entry_keeps_pending() {
        let mut calc = run("7 + 5");
        calc.press_clear_entry();
        assert_eq!(calc.pending_operation(), Some(Operator::Addition));
        assert_eq!(calc.first_operand(), "7");
        assert_eq!(calc.current_entry(), "0");
        calc.press_all(&parse_line("3 =").unwrap());
        assert_eq!(calc.primary_display(), ["10"]);
    }

    #[test]
    fn test_clear_all_resets_everything_but_history() {
        let mut calc = run("7 + 5 = + 2");
        calc.press_clear_all();
        assert_eq!(calc.current_entry(), "0");
        assert_eq!(calc.saved_result(), None);
        assert_eq!(calc.pending_operation(), None);
        assert_eq!(calc.first_operand(), "");
        assert_eq!(calc.second_operand(), "");
        assert_eq!(calc.expression_text(), "");
        assert_eq!(calc.result_text(), "0");
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_percent_of_pending_operand() {
        let calc = run("200 / 50 %");
        assert_eq!(calc.secondary_display(), ["200", "÷", "100"]);
        assert_eq!(calc.primary_display(), ["100"]);
        assert_eq!(calc.pending_operation(), Some(Operator::Division));
        let mut calc = calc;
        calc.press_equals();
        assert_eq!(calc.expression_text(), "200 ÷ 100 =");
        assert_eq!(calc.result_text(), "2");
    }

    #[test]
    fn test_percent_of_nothing_is_zero() {
        let calc = run("50 %");
        assert_eq!(calc.primary_display(), ["0"]);
        assert_eq!(calc.pending_operation(), Some(Operator::Percent));
        let calc = run("50 % =");
        assert_eq!(calc.primary_display(), ["0"]);
        assert_eq!(calc.pending_operation(), None);
    }

    #[test]
    fn test_equals_without_pending_is_identity() {
        let calc = run("42 =");
        assert_eq!(calc.expression_text(), "42 =");
        assert_eq!(calc.result_text(), "42");
        let calc = run("42, =");
        assert_eq!(calc.expression_text(), "42 =");
    }

    #[test]
    fn test_result_chains_into_next_operator() {
        let calc = run("7 + 5 = x 2 =");
        assert_eq!(calc.expression_text(), "12 × 2 =");
        assert_eq!(calc.result_text(), "24");
    }

    #[test]
    fn test_second_binary_operator_replaces_first_operand() {
        let calc = run("7 + 5 - 2 =");
        assert_eq!(calc.expression_text(), "5 - 2 =");
        assert_eq!(calc.result_text(), "3");
    }

    #[test]
    fn test_digit_after_result_starts_new_entry() {
        let calc = run("7 + 5 = 3");
        assert_eq!(calc.saved_result(), None);
        assert_eq!(calc.result_text(), "3");
        let calc = run("9 sqrt 4");
        assert_eq!(calc.result_text(), "4");
    }

    #[test]
    fn test_decimal_after_result_starts_new_entry() {
        let calc = run("9 sqrt ,");
        assert_eq!(calc.saved_result(), None);
        assert_eq!(calc.current_entry(), "0,");
        let calc = run("1,,5");
        assert_eq!(calc.current_entry(), "1,5");
    }

    #[test]
    fn test_toggle_sign_acts_on_shown_result() {
        let mut calc = run("7 + 5 =");
        calc.press_toggle_sign();
        assert_eq!(calc.saved_result(), Some("-12"));
        assert_eq!(calc.current_entry(), "0");
        assert_eq!(calc.primary_display(), ["-12"]);
        calc.press_toggle_sign();
        assert_eq!(calc.primary_display(), ["12"]);
    }

    #[test]
    fn test_toggle_sign_then_digit() {
        let calc = run("neg 5");
        assert_eq!(calc.current_entry(), "-5");
    }

    #[test]
    fn test_backspace() {
        let calc = run("123 bs");
        assert_eq!(calc.current_entry(), "12");
        let calc = run("1,5 neg bs bs bs");
        assert_eq!(calc.current_entry(), "0");
        let calc = run("12 + 34 = bs");
        assert_eq!(calc.saved_result(), Some("4"));
        assert_eq!(calc.result_text(), "4");
    }

    #[test]
    fn test_entry_length_is_capped() {
        let calc = run("123456789012345");
        assert_eq!(calc.current_entry(), "12345678901");
        assert_eq!(calc.size_class(), SizeClass::Small);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(
            run("99999 x 100001 =").primary_display(),
            ["9", "999", "999", "999"]
        );
        assert_eq!(run("100000 x 100000 =").result_text(), "10000000000");
        assert_eq!(run("100000 x 100001 =").result_text(), "Infinity");
        assert_eq!(run("100000 neg x 100001 =").result_text(), "-Infinity");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(run("1 / 3 =").result_text(), "0,333333");
        assert_eq!(run("0,1 + 0,2 =").result_text(), "0,3");
    }

    #[test]
    fn test_history_records_evaluations() {
        let calc = run("7 + 5 = 9 sqrt 4 =");
        assert_eq!(
            calc.history(),
            [
                HistoryEntry {
                    expression: "7 + 5 =".to_owned(),
                    result: "12".to_owned()
                },
                HistoryEntry {
                    expression: "√( 9 ) =".to_owned(),
                    result: "3".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut calc = Calculator::new();
        calc.press_digit(12);
        assert_eq!(calc.current_entry(), "0");
    }
}
