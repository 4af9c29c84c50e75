use crate::parse;

// points beyond this are treated as off-screen and break the curve
const CLIP_LIMIT: f64 = 1000.0;

/// A plottable function: an expression in `x` plus presentation tags.
/// Evaluation is delegated to `parse::evaluate_at`; rendering is the
/// caller's business.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphFunction {
    pub expression: String,
    pub color: String,
    pub visible: bool,
}

impl GraphFunction {
    pub fn new(expression: &str, color: &str) -> Self {
        GraphFunction {
            expression: expression.to_string(),
            color: color.to_string(),
            visible: true,
        }
    }
}

/// Samples `y = f(x)` over `[x_min, x_max]` at `steps + 1` evenly spaced
/// points. A `None` sample marks a break in the curve: the expression
/// failed there, produced a non-finite value, or left the clip range.
pub fn sample(func: &GraphFunction, x_min: f64, x_max: f64, steps: usize) -> Vec<(f64, Option<f64>)> {
    if steps == 0 || !(x_min < x_max) {
        return Vec::new();
    }

    let dx = (x_max - x_min) / steps as f64;
    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let x = x_min + dx * i as f64;
        let y = match parse::evaluate_at(&func.expression, x) {
            Ok(y) if y.abs() < CLIP_LIMIT => Some(y),
            _ => None,
        };
        points.push((x, y));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parabola() {
        let f = GraphFunction::new("x^2", "#667eea");
        let pts = sample(&f, -2.0, 2.0, 4);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], (-2.0, Some(4.0)));
        assert_eq!(pts[2].1, Some(0.0));
        assert_eq!(pts[4].1, Some(4.0));
    }

    #[test]
    fn test_sample_breaks_on_asymptote() {
        // 1/x blows past the clip limit near zero and divides by zero at it
        let f = GraphFunction::new("1/x", "#f00");
        let pts = sample(&f, -1.0, 1.0, 2);
        assert_eq!(pts[0].1, Some(-1.0));
        assert_eq!(pts[1].1, None);
        assert_eq!(pts[2].1, Some(1.0));
    }

    #[test]
    fn test_sample_breaks_on_error() {
        let f = GraphFunction::new("sqrt(x)", "#0f0");
        let pts = sample(&f, -1.0, 1.0, 2);
        // sqrt of a negative argument is a domain error, not NaN
        assert_eq!(pts[0].1, None);
        assert_eq!(pts[2].1, Some(1.0));
    }

    #[test]
    fn test_sample_degenerate_ranges() {
        let f = GraphFunction::new("x", "#00f");
        assert!(sample(&f, 1.0, 1.0, 10).is_empty());
        assert!(sample(&f, 2.0, 1.0, 10).is_empty());
        assert!(sample(&f, 0.0, 1.0, 0).is_empty());
    }
}
