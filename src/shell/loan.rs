// 💶 Loan - one quote for a borrower, printed with two decimals

use super::{Console, ShellError};
use crate::calculator::{quote_loan, LoanTerms};
use crate::input::{parse_integer, parse_number, ValueRule};

const FRAME: &str = "########################################################";

pub fn run(console: &mut Console<'_>) -> Result<(), ShellError> {
    let name = console.prompt("Name: ")?;
    let amount = parse_number("amount", &console.prompt("Amount: ")?, ValueRule::NonNegative)?;
    let months = parse_integer("term", &console.prompt("Term in months: ")?, ValueRule::Positive)?;
    let purpose = console.prompt("Purpose: ")?;
    let rate = parse_number(
        "monthly interest rate",
        &console.prompt("Monthly interest rate (%): ")?,
        ValueRule::NonNegative,
    )?;

    let quote = quote_loan(&LoanTerms {
        amount,
        months,
        monthly_rate: rate / 100.0,
    })?;

    console.blank()?;
    console.say(FRAME)?;
    console.say(format!("Credit questions for {} of {}:", purpose, name))?;
    console.say(FRAME)?;
    console.say(format!("Monthly interest to pay? {:.2}", quote.monthly_interest))?;
    console.say(format!("Monthly payment with interest? {:.2}", quote.monthly_payment))?;
    console.say(format!("Yearly payments (with interest)? {:.2}", quote.yearly_total))?;
    console.say(format!("Final amount of the loan? {:.2}", quote.final_total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputError;
    use crate::shell::testing::scripted;

    #[test]
    fn test_loan_report() {
        let (result, output) = scripted("Ana\n1200\n24\ncar\n2\n", run);

        assert!(result.is_ok());
        assert!(output.contains("Credit questions for car of Ana:"));
        assert!(output.contains("Monthly interest to pay? 24.00\n"));
        assert!(output.contains("Monthly payment with interest? 74.00\n"));
        assert!(output.contains("Yearly payments (with interest)? 888.00\n"));
        assert!(output.contains("Final amount of the loan? 1776.00\n"));
    }

    #[test]
    fn test_zero_term_is_rejected() {
        let (result, output) = scripted("Ana\n1200\n0\n", run);

        assert!(matches!(
            result,
            Err(ShellError::Input(InputError::OutOfRange { .. }))
        ));
        assert!(!output.contains("Credit questions"));
    }
}
