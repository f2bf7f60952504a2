use std::error::Error;
use std::fmt::Display;

use crate::ast::EvalError;
use crate::parser::{parse, ParseError};

#[derive(Debug, PartialEq)]
pub enum SampleError {
    Parse(ParseError),
    Eval(EvalError),
    /// `stop` was below `start`.
    RangeOrder { start: f64, stop: f64 },
    /// Zero, negative or NaN increment; the sampling loop needs a strictly
    /// positive step to terminate.
    NonPositiveIncrement(f64),
}

impl From<ParseError> for SampleError {
    fn from(parse_error: ParseError) -> Self {
        Self::Parse(parse_error)
    }
}

impl From<EvalError> for SampleError {
    fn from(eval_error: EvalError) -> Self {
        Self::Eval(eval_error)
    }
}

impl Display for SampleError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::Parse(parse_error) => write!(formatter, "{}", parse_error),
            SampleError::Eval(eval_error) => write!(formatter, "{}", eval_error),
            SampleError::RangeOrder { start, stop } => write!(
                formatter,
                "range must be provided in ascending order (start {}, stop {})",
                start, stop
            ),
            SampleError::NonPositiveIncrement(increment) => {
                write!(formatter, "increment must be positive, got {}", increment)
            }
        }
    }
}

impl Error for SampleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SampleError::Parse(parse_error) => Some(parse_error),
            SampleError::Eval(eval_error) => Some(eval_error),
            _ => None,
        }
    }
}

/// Samples `expression` over the half-open range `[start, stop)`.
///
/// The expression is parsed once, then evaluated at `start`,
/// `start + increment`, `start + 2 * increment`, ... while `x < stop`. The
/// two returned vectors are parallel: `domain[i]` is the x value the
/// corresponding `values[i]` was computed at, in generation order. A plotting
/// front end consumes the pair as-is.
pub fn eval_in_range(
    expression: &str,
    start: f64,
    stop: f64,
    increment: f64,
) -> Result<(Vec<f64>, Vec<f64>), SampleError> {
    if stop < start {
        return Err(SampleError::RangeOrder { start, stop });
    }
    if !(increment > 0.0) {
        return Err(SampleError::NonPositiveIncrement(increment));
    }

    let parsed_expression = parse(expression)?;

    let mut domain = Vec::new();
    let mut values = Vec::new();
    let mut x = start;
    while x < stop {
        domain.push(x);
        values.push(parsed_expression.eval(x)?);
        x += increment;
    }

    Ok((domain, values))
}

#[cfg(test)]
mod tests {
    extern crate rstest;

    use rstest::*;

    use super::*;

    #[test]
    fn it_returns_parallel_sequences() {
        let (domain, values) = eval_in_range("x * 2", 0.0, 1.0, 0.25).unwrap();
        assert_eq!(domain, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(values, vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn it_excludes_the_stop_bound() {
        let (domain, _) = eval_in_range("x", 0.0, 1.0, 0.5).unwrap();
        assert_eq!(domain, vec![0.0, 0.5]);
    }

    #[test]
    fn it_samples_constant_expressions() {
        let (domain, values) = eval_in_range("2 + 3 * 4 + 5", -1.0, 1.0, 0.5).unwrap();
        assert_eq!(domain.len(), values.len());
        assert!(values.iter().all(|&value| value == 19.0));
    }

    #[test]
    fn it_is_idempotent() {
        let first = eval_in_range("x", 0.0, 1.0, 0.1).unwrap();
        let second = eval_in_range("x", 0.0, 1.0, 0.1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn it_returns_empty_sequences_for_an_empty_range() {
        let (domain, values) = eval_in_range("x", 1.0, 1.0, 0.1).unwrap();
        assert_eq!(domain, vec![]);
        assert_eq!(values, vec![]);
    }

    #[test]
    fn it_rejects_a_descending_range() {
        assert_eq!(
            eval_in_range("x", 1.0, 0.0, 0.1).unwrap_err(),
            SampleError::RangeOrder {
                start: 1.0,
                stop: 0.0
            }
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    fn it_rejects_a_non_positive_increment(#[case] increment: f64) {
        assert_eq!(
            eval_in_range("x", 0.0, 1.0, increment).unwrap_err(),
            SampleError::NonPositiveIncrement(increment)
        );
    }

    #[test]
    fn it_rejects_a_nan_increment() {
        match eval_in_range("x", 0.0, 1.0, f64::NAN) {
            Err(SampleError::NonPositiveIncrement(increment)) => assert!(increment.is_nan()),
            other => panic!("expected an increment error, got {:?}", other),
        }
    }

    #[test]
    fn it_propagates_parse_failures_and_produces_no_samples() {
        assert_eq!(
            eval_in_range("foo(x)", 0.0, 1.0, 0.1).unwrap_err(),
            SampleError::Parse(ParseError::Lex(String::from("unknown function name 'foo'")))
        );
        assert_eq!(
            eval_in_range("(x", 0.0, 1.0, 0.1).unwrap_err(),
            SampleError::Parse(ParseError::UnexpectedEof)
        );
    }

    #[test]
    fn it_checks_the_range_before_parsing() {
        // a bad range fails even when the expression is also malformed
        assert_eq!(
            eval_in_range("foo(x)", 1.0, 0.0, 0.1).unwrap_err(),
            SampleError::RangeOrder {
                start: 1.0,
                stop: 0.0
            }
        );
    }

    #[test]
    fn it_keeps_lex_error_details_through_the_chain() {
        let error = eval_in_range(".", 0.0, 1.0, 0.1).unwrap_err();
        assert_eq!(
            error,
            SampleError::Parse(ParseError::Lex(String::from(
                "number after dot was expected"
            )))
        );
        assert_eq!(format!("{}", error), "number after dot was expected");
    }
}
