//! # Multi-mode calculator core
//!
//! The computation layer of a multi-mode calculator: pure numeric engines
//! with no UI, storage, or rendering concerns attached. Every operation
//! either returns a finite value or fails with an explicit
//! [`errors::CalcError`]; no NaN or infinity ever escapes as a result.
//!
//! The engines are independent of each other:
//! * [`engine`] - arithmetic and transcendental functions over doubles:
//!   the four basic operations, percentage, trigonometry with selectable
//!   angle unit, logarithms, powers and roots, factorial (up to 170), and
//!   display formatting with fixed/scientific switchover
//! * [`parse`] - an infix expression evaluator for parenthesized
//!   arithmetic with the constants `π` and `e`. Expressions are parsed
//!   into a token sequence and evaluated on an operator-priority stack;
//!   no runtime code evaluation is involved. `evaluate_at` additionally
//!   binds the variable `x` and a set of math functions for plotting
//! * [`bitwise`] - programmer mode: an arbitrary-precision integer masked
//!   to a selectable word size (8/16/32/64 bits) with bitwise operators,
//!   shifts, rotations, complements, and bin/oct/dec/hex display
//! * [`finance`] - closed-form loan amortization (EMI), compound
//!   interest, SIP future value, and fixed-deposit maturity with full
//!   per-period breakdowns
//! * [`convert`] - unit conversion across length, mass, temperature,
//!   volume, area, and digital storage
//! * [`graph`] - pointwise sampling of `y = f(x)` expressions for a
//!   plotting front-end
//! * [`session`] - the display-facing calculator state (operands in
//!   progress, memory register, bounded history) with an explicit JSON
//!   save/load contract
//!
//! Example:
//!
//! ```
//! use mcalc_lib::parse::evaluate;
//!
//! assert_eq!(evaluate("(5 + 3) * 2 - 4"), Ok(12.0));
//! assert_eq!(evaluate("2^10"), Ok(1024.0));
//! ```

#[macro_use]
extern crate pest_derive;

pub mod bitwise;
pub mod convert;
pub mod engine;
pub mod errors;
pub mod finance;
pub mod graph;
pub mod parse;
pub mod session;
pub mod stack;
