//! Calculator key events and the two ways of typing them: whole lines of
//! key tokens, and single keystrokes from a raw terminal.

use crate::error::CalcError;
use crate::operator::Operator;
use termion::event::Key as TermKey;

/// One press on the calculator keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    ClearEntry,
    ClearAll,
    Backspace,
    ToggleSign,
}

// Longer names must come before their prefixes ("sqrt" before "sqr", "ce" before "c").
// Names starting with a digit only match where no numeral is being typed.
const TOKENS: [(&str, Key); 26] = [
    ("1/x", Key::Operator(Operator::Inverse)),
    ("/x", Key::Operator(Operator::Inverse)),
    ("inv", Key::Operator(Operator::Inverse)),
    ("sqrt", Key::Operator(Operator::SquareRoot)),
    ("sqr", Key::Operator(Operator::Square)),
    ("x²", Key::Operator(Operator::Square)),
    ("√", Key::Operator(Operator::SquareRoot)),
    ("neg", Key::ToggleSign),
    ("±", Key::ToggleSign),
    ("ce", Key::ClearEntry),
    ("c", Key::ClearAll),
    ("bs", Key::Backspace),
    ("<", Key::Backspace),
    ("%", Key::Operator(Operator::Percent)),
    ("/", Key::Operator(Operator::Division)),
    ("÷", Key::Operator(Operator::Division)),
    ("*", Key::Operator(Operator::Multiplication)),
    ("x", Key::Operator(Operator::Multiplication)),
    ("×", Key::Operator(Operator::Multiplication)),
    ("-", Key::Operator(Operator::Subtraction)),
    ("−", Key::Operator(Operator::Subtraction)),
    ("+", Key::Operator(Operator::Addition)),
    ("=", Key::Equals),
    (",", Key::Decimal),
    (".", Key::Decimal),
    ("bksp", Key::Backspace),
];

/// Parse a line such as `7 + 5 =` or `9sqrt` into keys.
///
/// Nothing is returned unless the whole line parses; the error carries the
/// column of the first character that is not a key.
pub fn parse_line(line: &str) -> Result<Vec<Key>, CalcError> {
    let input = line.to_ascii_lowercase();
    let mut keys = Vec::new();
    let mut index = 0;

    'scan: while index < input.len() {
        let rest = &input[index..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_whitespace() || c == '_' {
            index += c.len_utf8();
            continue;
        }

        let in_numeral = input[..index]
            .chars()
            .next_back()
            .is_some_and(|prev| prev.is_ascii_digit() || prev == ',' || prev == '.');

        for (name, key) in TOKENS {
            if in_numeral && name.starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }
            if rest.starts_with(name) {
                keys.push(key);
                index += name.len();
                continue 'scan;
            }
        }

        if let Some(digit) = c.to_digit(10) {
            keys.push(Key::Digit(digit as u8));
            index += 1;
            continue;
        }

        let token: String = rest
            .chars()
            .take_while(|c| !c.is_whitespace())
            .collect();
        return Err(CalcError::UnknownKey {
            token,
            column: input[..index].chars().count(),
        });
    }

    Ok(keys)
}

/// Map a raw terminal keystroke to a calculator key, using the usual
/// desktop calculator shortcuts.
pub fn from_keypad(key: TermKey) -> Option<Key> {
    let key = match key {
        TermKey::Char(c) if c.is_ascii_digit() => Key::Digit(c as u8 - b'0'),
        TermKey::Char('.') | TermKey::Char(',') => Key::Decimal,
        TermKey::Char('+') => Key::Operator(Operator::Addition),
        TermKey::Char('-') => Key::Operator(Operator::Subtraction),
        TermKey::Char('*') => Key::Operator(Operator::Multiplication),
        TermKey::Char('/') => Key::Operator(Operator::Division),
        TermKey::Char('%') => Key::Operator(Operator::Percent),
        TermKey::Char('r') => Key::Operator(Operator::Inverse),
        TermKey::Char('q') => Key::Operator(Operator::Square),
        TermKey::Char('@') => Key::Operator(Operator::SquareRoot),
        TermKey::Char('\n') | TermKey::Char('=') => Key::Equals,
        TermKey::Char('n') | TermKey::F(9) => Key::ToggleSign,
        TermKey::Backspace => Key::Backspace,
        TermKey::Delete => Key::ClearEntry,
        TermKey::Esc => Key::ClearAll,
        _ => return None,
    };
    Some(key)
}
