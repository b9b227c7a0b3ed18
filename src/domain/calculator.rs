//! Arithmetic shared by the calculator tools and the calculator prompt

use thiserror::Error;

/// Division by zero. The tool path reports this to the caller as an
/// execution error; the prompt path renders the message as plain text.
#[derive(Debug, Error, PartialEq)]
#[error("cannot divide {dividend} by zero")]
pub struct DivisionError {
    pub dividend: f64,
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> Result<f64, DivisionError> {
    if b == 0.0 {
        return Err(DivisionError { dividend: a });
    }

    Ok(a / b)
}

/// Renders a calculator number for display. Integral values keep one
/// decimal place ("6.0", not "6"); everything else uses the shortest form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{add, divide, format_number, multiply, subtract};

    #[test]
    fn arithmetic_matches_f64_semantics() {
        assert_eq!(add(2.5, 4.0), 6.5);
        assert_eq!(subtract(2.5, 4.0), -1.5);
        assert_eq!(multiply(2.5, 4.0), 10.0);
        assert_eq!(divide(10.0, 4.0).expect("nonzero divisor"), 2.5);
    }

    #[test]
    fn divide_by_zero_reports_the_dividend() {
        let error = divide(4.0, 0.0).expect_err("zero divisor must fail");
        assert_eq!(error.dividend, 4.0);
        assert_eq!(error.to_string(), "cannot divide 4 by zero");
    }

    #[test]
    fn negative_zero_divisor_also_fails() {
        assert!(divide(1.0, -0.0).is_err());
    }

    #[test]
    fn integral_values_format_with_one_decimal() {
        assert_eq!(format_number(6.0), "6.0");
        assert_eq!(format_number(-3.0), "-3.0");
        assert_eq!(format_number(0.0), "0.0");
    }

    #[test]
    fn fractional_values_format_unchanged() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.125), "-0.125");
    }
}
