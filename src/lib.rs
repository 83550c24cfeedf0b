//! Standard four-function calculator engine.
//!
//! [`Calculator`] owns the whole arithmetic state of one calculator window.
//! Feed it [`Key`]s and read back the two display lines:
//!
//! ```
//! use deskcalc::{Calculator, Key, Operator};
//!
//! let mut calc = Calculator::new();
//! calc.press_all(&[
//!     Key::Digit(7),
//!     Key::Operator(Operator::Addition),
//!     Key::Digit(5),
//!     Key::Equals,
//! ]);
//! assert_eq!(calc.secondary_display(), ["7", "+", "5", "="]);
//! assert_eq!(calc.primary_display(), ["12"]);
//! ```

pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod format;
pub mod keys;
pub mod number;
pub mod operator;
pub mod render;

pub use engine::{Calculator, HistoryEntry};
pub use error::CalcError;
pub use format::SizeClass;
pub use keys::Key;
pub use operator::Operator;
