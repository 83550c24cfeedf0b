//! Calculator operators and the arithmetic behind each of them.

use crate::number::limit;

/// Every operator key on the standard keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Percent,
    Inverse,
    Square,
    SquareRoot,
    Division,
    Multiplication,
    Subtraction,
    Addition,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Percent,
        Operator::Inverse,
        Operator::Square,
        Operator::SquareRoot,
        Operator::Division,
        Operator::Multiplication,
        Operator::Subtraction,
        Operator::Addition,
    ];

    /// Unary operators evaluate as soon as they are pressed and never stay pending.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operator::Inverse | Operator::Square | Operator::SquareRoot
        )
    }

    pub fn is_binary(self) -> bool {
        !self.is_unary()
    }

    /// Glyph written into the expression line.
    ///
    /// Binary operators are written between their operands (`7 + 5`), unary
    /// ones as a function prefix (`√( 9 )`).
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Percent => "%",
            Operator::Inverse => "1/",
            Operator::Square => "sqr",
            Operator::SquareRoot => "√",
            Operator::Division => "÷",
            Operator::Multiplication => "×",
            Operator::Subtraction => "-",
            Operator::Addition => "+",
        }
    }

    /// Apply a unary operator. The result has already been through the limiter.
    pub fn apply_unary(self, operand: f64) -> f64 {
        let raw = match self {
            Operator::Inverse => 1.0 / operand,
            Operator::Square => operand * operand,
            Operator::SquareRoot => operand.sqrt(),
            _ => unreachable!("{:?} is not a unary operator", self),
        };
        limit(raw)
    }

    /// Apply a binary operator to `a <op> b`. The result has already been
    /// through the limiter. Percent yields `b` percent of `a`.
    pub fn apply_binary(self, a: f64, b: f64) -> f64 {
        let raw = match self {
            Operator::Percent => (a * b) / 100.0,
            Operator::Division => a / b,
            Operator::Multiplication => a * b,
            Operator::Subtraction => a - b,
            Operator::Addition => a + b,
            _ => unreachable!("{:?} is not a binary operator", self),
        };
        limit(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let unary: Vec<_> = Operator::ALL.iter().filter(|op| op.is_unary()).collect();
        assert_eq!(
            unary,
            [&Operator::Inverse, &Operator::Square, &Operator::SquareRoot]
        );
        assert!(Operator::Percent.is_binary());
        assert!(Operator::Division.is_binary());
    }

    #[test]
    fn test_unary_arithmetic() {
        assert_eq!(Operator::SquareRoot.apply_unary(9.0), 3.0);
        assert_eq!(Operator::Square.apply_unary(-4.0), 16.0);
        assert_eq!(Operator::Inverse.apply_unary(8.0), 0.125);
        assert_eq!(Operator::Inverse.apply_unary(3.0), 0.333333);
        assert!(Operator::SquareRoot.apply_unary(-1.0).is_nan());
    }

    #[test]
    fn test_binary_arithmetic() {
        assert_eq!(Operator::Addition.apply_binary(7.0, 5.0), 12.0);
        assert_eq!(Operator::Subtraction.apply_binary(7.0, 5.0), 2.0);
        assert_eq!(Operator::Subtraction.apply_binary(5.0, 7.0), -2.0);
        assert_eq!(Operator::Multiplication.apply_binary(1.5, 4.0), 6.0);
        assert_eq!(Operator::Division.apply_binary(1.0, 4.0), 0.25);
        assert_eq!(Operator::Percent.apply_binary(200.0, 50.0), 100.0);
        assert_eq!(Operator::Addition.apply_binary(0.1, 0.2), 0.3);
    }

    #[test]
    fn test_division_by_zero_is_not_special_cased() {
        assert_eq!(Operator::Division.apply_binary(5.0, 0.0), f64::INFINITY);
        assert_eq!(Operator::Division.apply_binary(-5.0, 0.0), f64::NEG_INFINITY);
        assert!(Operator::Division.apply_binary(0.0, 0.0).is_nan());
        assert_eq!(Operator::Inverse.apply_unary(0.0), f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "is not a unary operator")]
    fn test_binary_operator_as_unary_panics() {
        Operator::Addition.apply_unary(1.0);
    }
}
