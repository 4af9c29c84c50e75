use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::*;

/// Angle unit consumed by the trigonometric functions. Inputs in degrees
/// are converted to radians before calling the native function, inverse
/// functions convert their radian result back.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AngleUnit {
    #[serde(rename = "deg")]
    Deg,
    #[serde(rename = "rad")]
    Rad,
}

/// Displayed in place of a value when a computation produced a non-finite
/// result that slipped past the explicit checks
pub const ERROR_DISPLAY: &str = "Error";

const MAX_FACTORIAL: f64 = 170.0;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> CalcResult {
    if b == 0.0 {
        return Err(CalcError::DividedByZero);
    }
    Ok(a / b)
}

/// Binary modulo with the same zero-divisor rule as `divide`
pub fn modulo(a: f64, b: f64) -> CalcResult {
    if b == 0.0 {
        return Err(CalcError::DividedByZero);
    }
    Ok(a % b)
}

pub fn percentage(value: f64) -> f64 {
    value / 100.0
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

pub fn sin(angle: f64, unit: AngleUnit) -> f64 {
    let radians = if unit == AngleUnit::Deg { to_radians(angle) } else { angle };
    radians.sin()
}

pub fn cos(angle: f64, unit: AngleUnit) -> f64 {
    let radians = if unit == AngleUnit::Deg { to_radians(angle) } else { angle };
    radians.cos()
}

/// Total over reals; near odd multiples of 90 degrees the result is a very
/// large finite number, which is accepted as-is
pub fn tan(angle: f64, unit: AngleUnit) -> f64 {
    let radians = if unit == AngleUnit::Deg { to_radians(angle) } else { angle };
    radians.tan()
}

/// Inverse sine. The argument must be within `[-1, 1]`, values outside
/// fail with a domain error instead of propagating NaN
pub fn asin(value: f64, unit: AngleUnit) -> CalcResult {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::Domain("asin".to_string(), format!("{}", value)));
    }
    let result = value.asin();
    Ok(if unit == AngleUnit::Deg { to_degrees(result) } else { result })
}

/// Inverse cosine, same `[-1, 1]` domain rule as `asin`
pub fn acos(value: f64, unit: AngleUnit) -> CalcResult {
    if !(-1.0..=1.0).contains(&value) {
        return Err(CalcError::Domain("acos".to_string(), format!("{}", value)));
    }
    let result = value.acos();
    Ok(if unit == AngleUnit::Deg { to_degrees(result) } else { result })
}

pub fn atan(value: f64, unit: AngleUnit) -> f64 {
    let result = value.atan();
    if unit == AngleUnit::Deg {
        to_degrees(result)
    } else {
        result
    }
}

/// Base-10 logarithm, defined for positive arguments only
pub fn log(value: f64) -> CalcResult {
    if value <= 0.0 {
        return Err(CalcError::Domain("log".to_string(), format!("{}", value)));
    }
    Ok(value.log10())
}

/// Natural logarithm, defined for positive arguments only
pub fn ln(value: f64) -> CalcResult {
    if value <= 0.0 {
        return Err(CalcError::Domain("ln".to_string(), format!("{}", value)));
    }
    Ok(value.ln())
}

/// Native exponentiation. Fails only when the result is non-finite,
/// e.g. on overflow or `0 ^ -1`
pub fn power(base: f64, exponent: f64) -> CalcResult {
    let result = base.powf(exponent);
    if !result.is_finite() {
        return Err(CalcError::NonFinite);
    }
    Ok(result)
}

pub fn sqrt(value: f64) -> CalcResult {
    if value < 0.0 {
        return Err(CalcError::Domain("sqrt".to_string(), format!("{}", value)));
    }
    Ok(value.sqrt())
}

pub fn cbrt(value: f64) -> f64 {
    value.cbrt()
}

/// Factorial over doubles: the argument must be a non-negative integer not
/// greater than 170 (171! overflows f64)
pub fn factorial(n: f64) -> CalcResult {
    if n < 0.0 {
        return Err(CalcError::Domain("factorial".to_string(), format!("{}", n)));
    }
    if n.fract() != 0.0 {
        return Err(CalcError::NotAnInteger(n));
    }
    if n > MAX_FACTORIAL {
        return Err(CalcError::Overflow(n));
    }

    let n = n as u32;
    let mut result = 1.0f64;
    for i in 2..=n {
        result *= f64::from(i);
    }
    Ok(result)
}

pub fn reciprocal(value: f64) -> CalcResult {
    if value == 0.0 {
        return Err(CalcError::DividedByZero);
    }
    Ok(1.0 / value)
}

pub fn square(value: f64) -> f64 {
    value * value
}

pub fn cube(value: f64) -> f64 {
    value * value * value
}

pub fn negate(value: f64) -> f64 {
    -value
}

pub fn abs(value: f64) -> f64 {
    value.abs()
}

pub fn exp(value: f64) -> f64 {
    value.exp()
}

/// Applies a pending binary operator the way the display layer sends it:
/// both the ASCII and the keypad glyph spellings are accepted
pub fn apply_operator(a: f64, operator: &str, b: f64) -> CalcResult {
    match operator {
        "+" => Ok(add(a, b)),
        "-" | "−" => Ok(subtract(a, b)),
        "*" | "×" => Ok(multiply(a, b)),
        "/" | "÷" => divide(a, b),
        "^" => power(a, b),
        _ => Err(CalcError::InvalidOp(operator.to_string())),
    }
}

/// Formats a value for display: scientific notation outside
/// `[1e-10, 1e15)`, otherwise fixed to `precision` decimal digits with
/// trailing zeros and a dangling decimal point stripped
pub fn format_result(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return ERROR_DISPLAY.to_string();
    }

    let abs = value.abs();
    if abs >= 1e15 || (abs > 0.0 && abs < 1e-10) {
        return format!("{:.*e}", precision, value);
    }

    let fixed = format!("{:.*}", precision, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::E;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(add(2.0, 3.0), 5.0);
        assert_eq!(subtract(2.0, 3.0), -1.0);
        assert_eq!(multiply(4.0, 2.5), 10.0);
        assert_eq!(divide(10.0, 4.0), Ok(2.5));
        assert_eq!(divide(1.0, 0.0), Err(CalcError::DividedByZero));
        assert_eq!(percentage(45.0), 0.45);
        assert_eq!(reciprocal(4.0), Ok(0.25));
        assert_eq!(reciprocal(0.0), Err(CalcError::DividedByZero));
    }

    #[test]
    fn test_mul_div_roundtrip() {
        let pairs = [(3.5, 7.0), (-12.25, 0.5), (1e8, 3.0), (0.1, 0.3)];
        for (a, b) in pairs.iter() {
            let v = divide(multiply(*a, *b), *b).unwrap();
            assert!(close(v, *a), "{} * {} / {} = {}", a, b, b, v);
        }
    }

    #[test]
    fn test_trig() {
        assert!(close(sin(90.0, AngleUnit::Deg), 1.0));
        assert!(close(sin(std::f64::consts::FRAC_PI_2, AngleUnit::Rad), 1.0));
        assert!(close(cos(180.0, AngleUnit::Deg), -1.0));
        assert!(close(tan(45.0, AngleUnit::Deg), 1.0));
        assert!(close(asin(1.0, AngleUnit::Deg).unwrap(), 90.0));
        assert!(close(acos(-1.0, AngleUnit::Rad).unwrap(), std::f64::consts::PI));
        assert!(close(atan(1.0, AngleUnit::Deg), 45.0));
    }

    #[test]
    fn test_inverse_trig_domain() {
        assert_eq!(
            asin(1.5, AngleUnit::Deg),
            Err(CalcError::Domain("asin".to_string(), "1.5".to_string()))
        );
        assert!(acos(-1.1, AngleUnit::Rad).is_err());
    }

    #[test]
    fn test_logs() {
        assert!(close(log(1000.0).unwrap(), 3.0));
        assert!(close(ln(E).unwrap(), 1.0));
        assert!(log(0.0).is_err());
        assert!(ln(-3.0).is_err());
    }

    #[test]
    fn test_power_and_roots() {
        assert_eq!(power(2.0, 10.0), Ok(1024.0));
        assert_eq!(power(1e200, 3.0), Err(CalcError::NonFinite));
        assert_eq!(sqrt(16.0), Ok(4.0));
        assert!(sqrt(-1.0).is_err());
        assert!(close(cbrt(-27.0), -3.0));
        assert_eq!(square(-3.0), 9.0);
        assert_eq!(cube(-3.0), -27.0);
    }

    #[test]
    fn test_factorial() {
        let mut expected = 1.0f64;
        for n in 0..=170u32 {
            if n > 0 {
                expected *= f64::from(n);
            }
            assert_eq!(factorial(f64::from(n)), Ok(expected), "factorial({})", n);
        }
        assert_eq!(factorial(171.0), Err(CalcError::Overflow(171.0)));
        assert_eq!(
            factorial(-1.0),
            Err(CalcError::Domain("factorial".to_string(), "-1".to_string()))
        );
        assert_eq!(factorial(2.5), Err(CalcError::NotAnInteger(2.5)));
    }

    #[test]
    fn test_apply_operator() {
        assert_eq!(apply_operator(7.0, "+", 3.0), Ok(10.0));
        assert_eq!(apply_operator(7.0, "−", 3.0), Ok(4.0));
        assert_eq!(apply_operator(7.0, "×", 3.0), Ok(21.0));
        assert_eq!(apply_operator(7.0, "÷", 0.0), Err(CalcError::DividedByZero));
        assert_eq!(apply_operator(2.0, "^", 8.0), Ok(256.0));
        assert_eq!(apply_operator(1.0, "@", 2.0), Err(CalcError::InvalidOp("@".to_string())));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(f64::NAN, 10), "Error");
        assert_eq!(format_result(f64::INFINITY, 10), "Error");
        assert_eq!(format_result(0.0, 10), "0");
        assert_eq!(format_result(-0.0, 10), "0");
        assert_eq!(format_result(12.5, 10), "12.5");
        assert_eq!(format_result(3.0, 10), "3");
        assert_eq!(format_result(0.1 + 0.2, 10), "0.3");
        assert!(format_result(1e15, 10).contains('e'));
        assert!(format_result(1e-11, 10).contains('e'));
        assert!(!format_result(1e-10, 10).contains('e'));
    }

    #[test]
    fn test_format_result_roundtrip() {
        for v in [12.340000001, -0.000123, 99999.0, 1.0 / 3.0] {
            let s1 = format_result(v, 10);
            let parsed: f64 = s1.parse().unwrap();
            let s2 = format_result(parsed, 10);
            assert_eq!(s1, s2);
        }
    }
}
