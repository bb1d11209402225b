// Calculator menu loop

use super::{Console, ShellError};
use crate::calculator::{Operation, EXIT_KEY};
use crate::input::{parse_number, ValueRule};

fn print_menu(console: &mut Console<'_>) -> Result<(), ShellError> {
    console.say("#############")?;
    console.say("#Calculator#")?;
    console.say("#############")?;
    for op in Operation::ALL {
        console.say(format!("{}. {}", op.key(), op.name()))?;
    }
    console.say(format!("{}. Exit", EXIT_KEY))
}

fn evaluate(op: Operation, console: &mut Console<'_>) -> Result<f64, ShellError> {
    let a = parse_number("first number", &console.prompt("Enter a number: ")?, ValueRule::Any)?;
    let b = parse_number("second number", &console.prompt("Enter another number: ")?, ValueRule::Any)?;
    Ok(op.apply(a, b)?)
}

pub fn run(console: &mut Console<'_>) -> Result<(), ShellError> {
    loop {
        print_menu(console)?;
        let choice = match console.prompt("Choose an operation: ") {
            Ok(choice) => choice,
            Err(ShellError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e),
        };

        if choice == EXIT_KEY {
            return Ok(());
        }
        let Some(op) = Operation::from_key(&choice) else {
            console.say("Invalid operation")?;
            continue;
        };

        match evaluate(op, console) {
            Ok(result) => console.say(format!("Result: {}", result))?,
            Err(ShellError::EndOfInput) => return Ok(()),
            Err(e) if e.is_recoverable() => console.say(&e)?,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::scripted;

    #[test]
    fn test_calculation_session() {
        let (result, output) = scripted("1\n2\n3\n4\n1\n0\n9\n5\n", run);

        assert!(result.is_ok());
        assert!(output.contains("Result: 5"));
        assert!(output.contains("cannot divide by 0"));
        assert!(output.contains("Invalid operation"));
    }

    #[test]
    fn test_non_numeric_operand() {
        let (_, output) = scripted("3\nten\n", run);
        assert!(output.contains("first number: 'ten' is not a number"));
    }
}
