use num_bigint::BigInt;
use num_traits::{Num, One, Zero};

use crate::errors::*;

/// Bit width the programmer-mode value is masked to. Shrinking the word
/// size truncates high bits; there is no way back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WordSize {
    Byte,
    Word,
    Dword,
    Qword,
}

impl WordSize {
    pub fn bits(self) -> usize {
        match self {
            WordSize::Byte => 8,
            WordSize::Word => 16,
            WordSize::Dword => 32,
            WordSize::Qword => 64,
        }
    }

    pub(crate) fn mask(self) -> BigInt {
        (BigInt::one() << self.bits()) - 1
    }
}

/// Base the display shows and digits are entered in
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NumberBase {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl NumberBase {
    pub fn radix(self) -> u32 {
        match self {
            NumberBase::Bin => 2,
            NumberBase::Oct => 8,
            NumberBase::Dec => 10,
            NumberBase::Hex => 16,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BitOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
}

/// Whether a digit key is legal in the given display base (hex letters are
/// dead outside HEX mode, `8`/`9` are dead in octal, and so on)
pub fn is_digit_legal(digit: char, base: NumberBase) -> bool {
    match digit.to_digit(16) {
        Some(d) => d < base.radix(),
        None => false,
    }
}

/// Programmer-mode calculator: an arbitrary-precision integer masked to the
/// active word size after every mutation, plus the classic deferred-operator
/// state machine (previous value, pending operator, waiting-for-operand).
///
/// The stored value is always unsigned, held in `[0, 2^bits - 1]`.
/// One's/two's complement are explicit bit transforms, not the storage
/// format.
pub struct BitCalc {
    word_size: WordSize,
    base: NumberBase,
    current: BigInt,
    previous: BigInt,
    operator: Option<BitOp>,
    waiting_for_operand: bool,
}

impl Default for BitCalc {
    fn default() -> BitCalc {
        BitCalc {
            word_size: WordSize::Dword,
            base: NumberBase::Dec,
            current: BigInt::zero(),
            previous: BigInt::zero(),
            operator: None,
            waiting_for_operand: false,
        }
    }
}

impl BitCalc {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn value(&self) -> &BigInt {
        &self.current
    }

    pub fn word_size(&self) -> WordSize {
        self.word_size
    }

    pub fn base(&self) -> NumberBase {
        self.base
    }

    pub fn pending_operator(&self) -> Option<BitOp> {
        self.operator
    }

    /// Changes the word size and immediately truncates the current value to
    /// it. Lossy by design.
    pub fn set_word_size(&mut self, size: WordSize) {
        self.word_size = size;
        self.current = &self.current & size.mask();
    }

    pub fn set_base(&mut self, base: NumberBase) {
        self.base = base;
    }

    /// Appends a digit in the current display base. Digits that are not
    /// legal in the base, or input that no longer parses, are rejected
    /// silently - the value simply does not change.
    pub fn input_digit(&mut self, digit: char) {
        if !is_digit_legal(digit, self.base) {
            return;
        }
        if self.waiting_for_operand {
            self.current = BigInt::zero();
            self.waiting_for_operand = false;
        }

        let radix = self.base.radix();
        let cur = self.current.to_str_radix(radix);
        let appended = if cur == "0" {
            digit.to_string()
        } else {
            format!("{}{}", cur, digit)
        };
        let parsed = match BigInt::from_str_radix(&appended, radix) {
            Ok(v) => v,
            Err(..) => return,
        };
        self.current = parsed & self.word_size.mask();
    }

    /// Drops the last digit in the current display base
    pub fn backspace(&mut self) {
        let radix = self.base.radix();
        let s = self.current.to_str_radix(radix);
        if s.len() <= 1 {
            self.current = BigInt::zero();
            return;
        }
        if let Ok(v) = BigInt::from_str_radix(&s[..s.len() - 1], radix) {
            self.current = v;
        }
    }

    /// Stores a pending binary operator. If one is already pending and an
    /// operand has been entered, the previous operation is applied first
    /// (chained operations, standard calculator behavior).
    pub fn set_operator(&mut self, op: BitOp) -> CalcErrorResult {
        if self.operator.is_some() && !self.waiting_for_operand {
            self.calculate()?;
        }
        self.previous = self.current.clone();
        self.operator = Some(op);
        self.waiting_for_operand = true;
        Ok(())
    }

    /// Applies the pending operator between the stashed and current values,
    /// masks the result to the word size and makes it the current value.
    /// The operator is cleared and waiting-for-operand is set even when the
    /// operation fails.
    pub fn calculate(&mut self) -> CalcErrorResult {
        let op = match self.operator.take() {
            Some(op) => op,
            None => return Ok(()),
        };
        self.waiting_for_operand = true;

        let prev = &self.previous;
        let cur = &self.current;
        let result = match op {
            BitOp::Add => prev + cur,
            BitOp::Sub => prev - cur,
            BitOp::Mul => prev * cur,
            BitOp::Div => {
                if cur.is_zero() {
                    return Err(CalcError::DividedByZero);
                }
                prev / cur
            }
            BitOp::Mod => {
                if cur.is_zero() {
                    return Err(CalcError::DividedByZero);
                }
                prev % cur
            }
            BitOp::And => prev & cur,
            BitOp::Or => prev | cur,
            BitOp::Xor => prev ^ cur,
        };

        // a negative subtraction result wraps around here: num-bigint ANDs
        // negatives in two's complement
        self.current = result & self.word_size.mask();
        Ok(())
    }

    /// One's complement, applied immediately (not deferred)
    pub fn not(&mut self) {
        self.current = &self.current ^ self.word_size.mask();
    }

    pub fn ones_complement(&mut self) {
        self.not();
    }

    /// `(~value + 1) mod 2^bits`
    pub fn twos_complement(&mut self) {
        let flipped = &self.current ^ self.word_size.mask();
        self.current = (flipped + 1) & self.word_size.mask();
    }

    /// Negation in an unsigned engine is the two's complement
    pub fn negate(&mut self) {
        self.twos_complement();
    }

    /// Left shift drops bits past the word size; right shift is logical
    /// (values are stored unsigned, there is no sign to extend)
    pub fn shift(&mut self, direction: Direction, amount: usize) {
        self.current = match direction {
            Direction::Left => (&self.current << amount) & self.word_size.mask(),
            Direction::Right => &self.current >> amount,
        };
    }

    /// Circular rotation by one bit within exactly the word size
    pub fn rotate(&mut self, direction: Direction) {
        let bits = self.word_size.bits();
        let mask = self.word_size.mask();
        let value = &self.current;

        self.current = match direction {
            Direction::Left => {
                let msb = (value >> (bits - 1)) & BigInt::one();
                ((value << 1) | msb) & mask
            }
            Direction::Right => {
                let lsb = value & BigInt::one();
                (value >> 1) | (lsb << (bits - 1))
            }
        };
    }

    /// Flips a single bit; `index` counts from the most significant bit of
    /// the active word, the way the bit display is laid out
    pub fn toggle_bit(&mut self, index: usize) {
        let bits = self.word_size.bits();
        if index >= bits {
            return;
        }
        self.current = &self.current ^ (BigInt::one() << (bits - 1 - index));
    }

    pub fn clear(&mut self) {
        self.current = BigInt::zero();
        self.previous = BigInt::zero();
        self.operator = None;
        self.waiting_for_operand = false;
    }

    // ------------ display accessors -----------------

    pub fn hex(&self) -> String {
        self.current.to_str_radix(16).to_uppercase()
    }

    pub fn dec(&self) -> String {
        self.current.to_str_radix(10)
    }

    pub fn oct(&self) -> String {
        self.current.to_str_radix(8)
    }

    /// Binary form zero-padded to the full word size
    pub fn bin(&self) -> String {
        let s = self.current.to_str_radix(2);
        let bits = self.word_size.bits();
        if s.len() >= bits {
            s
        } else {
            format!("{}{}", "0".repeat(bits - s.len()), s)
        }
    }

    /// Value rendered in the active display base
    pub fn display(&self) -> String {
        match self.base {
            NumberBase::Bin => self.bin(),
            NumberBase::Oct => self.oct(),
            NumberBase::Dec => self.dec(),
            NumberBase::Hex => self.hex(),
        }
    }
}
