use lazy_static::lazy_static;

use crate::engine;
use crate::engine::AngleUnit;
use crate::errors::*;

/// A parsed token on its way through the shunting-yard conversion
#[derive(Clone, Debug)]
pub(crate) enum Entry {
    Val(f64),
    Op(String, i32, bool),
    OpenB,
    Func(String),
}

/// Converts the token stream pushed by the parser into postfix order and
/// replays it over a value stack. Owned by a single evaluation call.
pub(crate) struct Stack {
    pub(crate) queue: Vec<Entry>,
    pub(crate) output: Vec<Entry>,
    values: Vec<f64>,
}

pub(crate) const UNARY_MINUS: &str = "---";

lazy_static! {
    /// Functions recognized by the graph-mode evaluator. All trigonometry
    /// here is in radians, matching how plotted expressions are written.
    pub(crate) static ref STD_FUNCS: Vec<&'static str> = [
        "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "cbrt", "abs", "log", "ln", "exp",
    ]
    .to_vec();
}

impl Stack {
    // Unary minus binds tighter than power, so `-2^2` evaluates to 4.
    // Power is the only right-associative binary operator.
    fn priority(op: &str) -> (i32, bool) {
        match op {
            UNARY_MINUS => (20, true),
            "^" => (17, true),
            "*" | "/" | "%" => (12, false),
            "+" | "-" => (8, false),
            _ => (0, false), // invalid op
        }
    }

    pub(crate) fn is_func(&self, s: &str) -> bool {
        STD_FUNCS.iter().any(|f| *f == s)
    }

    // move operators from the queue to output while the top operator in the
    // queue has equal or greater priority
    fn pop_while_priority(&mut self, priority: i32) {
        loop {
            if self.queue.is_empty() {
                return;
            }
            // queue is not empty, so unwrap is OK
            let e = self.queue.pop().unwrap();
            match &e {
                Entry::OpenB => {
                    self.queue.push(e);
                    return;
                }
                Entry::Func(..) => {
                    self.output.push(e);
                }
                Entry::Op(_, p, right) => {
                    if *p > priority || (*p == priority && !*right) {
                        self.output.push(e);
                    } else {
                        self.queue.push(e);
                        return;
                    }
                }
                _ => return, // unreachable
            }
        }
    }

    // move operators from the queue to output until the matching bracket
    fn pop_until_bracket(&mut self) -> CalcErrorResult {
        loop {
            if self.queue.is_empty() {
                return Err(CalcError::ClosingBracketMismatch);
            }

            // unwrap is ok - vector is not empty
            let e = self.queue.pop().unwrap();
            match &e {
                Entry::Val(..) | Entry::Op(..) | Entry::Func(..) => self.output.push(e),
                Entry::OpenB => return Ok(()),
            }
        }
    }

    // move all remaining operators from queue to output.
    // Must be called only after the expression ends. A bracket still in the
    // queue at this point means the expression never closed it.
    fn pop_all(&mut self) -> CalcErrorResult {
        while let Some(v) = self.queue.pop() {
            match &v {
                Entry::OpenB => return Err(CalcError::OpenBracketMismatch),
                Entry::Op(..) | Entry::Func(..) => self.output.push(v),
                _ => return Err(CalcError::Unreachable),
            }
        }
        Ok(())
    }

    // ------------ PUBLIC -----------------

    pub(crate) fn new() -> Self {
        Stack {
            queue: Vec::new(),
            output: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, op: &str, val: Option<f64>) -> CalcErrorResult {
        if op.is_empty() {
            if let Some(v) = val {
                self.output.push(Entry::Val(v));
            } else {
                return Err(CalcError::EmptyExpression);
            }
            return Ok(());
        }

        if self.is_func(op) {
            self.queue.push(Entry::Func(op.to_owned()));
            return Ok(());
        }

        if op == "(" {
            self.queue.push(Entry::OpenB);
            return Ok(());
        }

        if op == ")" {
            return self.pop_until_bracket();
        }

        let (pri, right_assoc) = Stack::priority(op);
        if pri == 0 {
            return Err(CalcError::InvalidOp(op.to_owned()));
        }

        self.pop_while_priority(pri);
        self.queue.push(Entry::Op(op.to_owned(), pri, right_assoc));

        Ok(())
    }

    pub(crate) fn calculate(&mut self) -> CalcResult {
        self.pop_all()?;
        if self.output.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.values = Vec::new();

        for i in 0..self.output.len() {
            let o = self.output[i].clone();
            match o {
                Entry::Val(v) => self.values.push(v),
                Entry::Op(op, ..) => self.process_operator(&op)?,
                Entry::Func(fname) => self.process_function(&fname)?,
                _ => return Err(CalcError::Unreachable),
            }
        }

        if self.values.len() != 1 {
            return Err(CalcError::InsufficientOps);
        }

        // values is never empty after calculation - unwrap is fine
        let result = self.values.pop().unwrap();
        if !result.is_finite() {
            return Err(CalcError::NonFinite);
        }
        Ok(result)
    }

    fn unary<F>(&mut self, f: F) -> CalcErrorResult
    where
        F: FnOnce(f64) -> CalcResult,
    {
        if self.values.is_empty() {
            return Err(CalcError::TooManyOps);
        }

        let v = self.values.pop().unwrap();
        self.values.push(f(v)?);
        Ok(())
    }

    fn binary<F>(&mut self, f: F) -> CalcErrorResult
    where
        F: FnOnce(f64, f64) -> CalcResult,
    {
        if self.values.len() < 2 {
            return Err(CalcError::TooManyOps);
        }

        let v2 = self.values.pop().unwrap();
        let v1 = self.values.pop().unwrap();
        self.values.push(f(v1, v2)?);
        Ok(())
    }

    fn process_operator(&mut self, op: &str) -> CalcErrorResult {
        match op {
            "+" => self.binary(|a, b| Ok(engine::add(a, b))),
            "-" => self.binary(|a, b| Ok(engine::subtract(a, b))),
            "*" => self.binary(|a, b| Ok(engine::multiply(a, b))),
            "/" => self.binary(engine::divide),
            "%" => self.binary(engine::modulo),
            "^" => self.binary(engine::power),
            UNARY_MINUS => self.unary(|v| Ok(engine::negate(v))),
            _ => Err(CalcError::InvalidOp(op.to_string())),
        }
    }

    fn process_function(&mut self, fname: &str) -> CalcErrorResult {
        match fname {
            "sin" => self.unary(|v| Ok(engine::sin(v, AngleUnit::Rad))),
            "cos" => self.unary(|v| Ok(engine::cos(v, AngleUnit::Rad))),
            "tan" => self.unary(|v| Ok(engine::tan(v, AngleUnit::Rad))),
            "asin" => self.unary(|v| engine::asin(v, AngleUnit::Rad)),
            "acos" => self.unary(|v| engine::acos(v, AngleUnit::Rad)),
            "atan" => self.unary(|v| Ok(engine::atan(v, AngleUnit::Rad))),
            "sqrt" => self.unary(engine::sqrt),
            "cbrt" => self.unary(|v| Ok(engine::cbrt(v))),
            "abs" => self.unary(|v| Ok(engine::abs(v))),
            "log" => self.unary(engine::log),
            "ln" => self.unary(engine::ln),
            "exp" => self.unary(|v| Ok(engine::exp(v))),
            _ => Err(CalcError::UnknownFunction(fname.to_string())),
        }
    }
}
