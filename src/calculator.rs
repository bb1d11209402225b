// 🧮 Calculator - the four basic operations, keyed by menu choice, and a
// flat-interest loan quote

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sum,
    Subtraction,
    Multiplication,
    Division,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("cannot divide by 0")]
    DivisionByZero,

    #[error("the loan term must be at least 1 month")]
    ZeroTerm,
}

/// Menu key that leaves the calculator
pub const EXIT_KEY: &str = "5";

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Sum,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Operation::Sum => "1",
            Operation::Subtraction => "2",
            Operation::Multiplication => "3",
            Operation::Division => "4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Sum => "Sum",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division => "Division",
        }
    }

    pub fn from_key(key: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.key() == key)
    }

    pub fn apply(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Operation::Sum => Ok(a + b),
            Operation::Subtraction => Ok(a - b),
            Operation::Multiplication => Ok(a * b),
            Operation::Division if b == 0.0 => Err(CalcError::DivisionByZero),
            Operation::Division => Ok(a / b),
        }
    }
}

// ============================================================================
// LOAN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub amount: f64,
    pub months: u32,
    /// Fraction per month, e.g. 0.02 for 2%
    pub monthly_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    pub monthly_interest: f64,
    pub monthly_payment: f64,
    pub yearly_total: f64,
    pub final_total: f64,
}

/// Flat interest on the full amount every month, principal split evenly
pub fn quote_loan(terms: &LoanTerms) -> Result<LoanQuote, CalcError> {
    if terms.months == 0 {
        return Err(CalcError::ZeroTerm);
    }

    let monthly_interest = terms.monthly_rate * terms.amount;
    let monthly_payment = terms.amount / f64::from(terms.months) + monthly_interest;

    Ok(LoanQuote {
        monthly_interest,
        monthly_payment,
        yearly_total: monthly_payment * 12.0,
        final_total: monthly_payment * f64::from(terms.months),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations() {
        assert_eq!(Operation::Sum.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operation::Subtraction.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(Operation::Multiplication.apply(2.0, 3.0), Ok(6.0));
        assert_eq!(Operation::Division.apply(3.0, 2.0), Ok(1.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            Operation::Division.apply(1.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(Operation::from_key("3"), Some(Operation::Multiplication));
        assert_eq!(Operation::from_key(EXIT_KEY), None);
        assert_eq!(Operation::from_key("x"), None);
    }

    #[test]
    fn test_loan_quote() {
        let terms = LoanTerms {
            amount: 1200.0,
            months: 24,
            monthly_rate: 0.02,
        };
        let quote = quote_loan(&terms).unwrap();

        assert!((quote.monthly_interest - 24.0).abs() < 1e-9);
        assert!((quote.monthly_payment - 74.0).abs() < 1e-9);
        assert!((quote.yearly_total - 888.0).abs() < 1e-9);
        assert!((quote.final_total - 1776.0).abs() < 1e-9);
    }

    #[test]
    fn test_loan_needs_a_term() {
        let terms = LoanTerms {
            amount: 500.0,
            months: 0,
            monthly_rate: 0.01,
        };
        assert_eq!(quote_loan(&terms), Err(CalcError::ZeroTerm));
    }
}
