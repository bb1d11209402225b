// 🎓 Grading - one batch of students, grades per discipline, class report
//
// Any invalid count or grade aborts the whole run; the caller turns that
// into a failing exit status.

use super::{Console, ShellError};
use crate::aggregate::{all_group_stats, owner_mean};
use crate::config::AppConfig;
use crate::entities::Tags;
use crate::input::{parse_integer, ValueRule};
use crate::store::RecordStore;

fn read_students(config: &AppConfig, console: &mut Console<'_>) -> Result<RecordStore, ShellError> {
    let count = parse_integer(
        "number of students",
        &console.prompt("Please enter the number of students to grade: ")?,
        ValueRule::Positive,
    )?;

    let rule = config.grade_rule();
    let mut store = RecordStore::new();

    for n in 1..=count {
        let student = store.add_owner(&format!("Student {}", n))?;
        console.blank()?;
        console.say(format!("Grades for student {}:", student.id))?;

        for discipline in &config.disciplines {
            let text = console.prompt(&format!("- Grade in {}: ", discipline))?;
            let grade = parse_integer(discipline, &text, rule)?;
            store.add_measurement(student.id, grade as f64, Tags::group(discipline.as_str()))?;
        }
    }

    Ok(store)
}

/// Print the class report for an already filled store
pub fn report(
    store: &RecordStore,
    disciplines: &[String],
    console: &mut Console<'_>,
) -> Result<(), ShellError> {
    let stats = all_group_stats(store, disciplines)?;

    console.blank()?;
    console.say("Results:")?;
    for group in &stats {
        console.say(format!("Average grade in {}: {:.2}", group.group_key, group.mean))?;
    }

    console.blank()?;
    console.say("Average grade per student:")?;
    for student in store.owners() {
        let mean = owner_mean(store, student.id)?;
        console.say(format!("- {}: {:.2}", student.name, mean))?;
    }

    console.blank()?;
    console.say("Best grade per discipline:")?;
    for group in &stats {
        console.say(format!(
            "- {}: {} ({})",
            group.group_key, group.best.name, group.best.value
        ))?;
    }

    console.blank()?;
    console.say("Worst grade per discipline:")?;
    for group in &stats {
        console.say(format!(
            "- {}: {} ({})",
            group.group_key, group.worst.name, group.worst.value
        ))?;
    }

    Ok(())
}

pub fn run(config: &AppConfig, console: &mut Console<'_>) -> Result<(), ShellError> {
    console.say("Welcome to the student grading system")?;
    console.blank()?;

    let store = read_students(config, console)?;
    report(&store, &config.disciplines, console)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputError;
    use crate::shell::testing::scripted;

    fn config() -> AppConfig {
        AppConfig {
            disciplines: vec!["Math".to_string(), "Art".to_string()],
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_class_report() {
        let config = config();
        let (result, output) = scripted("2\n10\n15\n18\n15\n", |console| run(&config, console));

        assert!(result.is_ok());
        assert!(output.contains("Average grade in Math: 14.00"));
        assert!(output.contains("Average grade in Art: 15.00"));
        assert!(output.contains("- Student 1: 12.50"));
        assert!(output.contains("- Student 2: 16.50"));
        assert!(output.contains("Best grade per discipline:\n- Math: Student 2 (18)\n- Art: Student 1 (15)"));
        assert!(output.contains("Worst grade per discipline:\n- Math: Student 1 (10)\n- Art: Student 1 (15)"));
    }

    #[test]
    fn test_zero_students_aborts() {
        let config = config();
        let (result, _) = scripted("0\n", |console| run(&config, console));

        assert!(matches!(
            result,
            Err(ShellError::Input(InputError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_grade_out_of_range_aborts() {
        let config = config();
        let (result, _) = scripted("1\n21\n", |console| run(&config, console));

        assert!(matches!(
            result,
            Err(ShellError::Input(InputError::OutOfRange { .. }))
        ));
    }
}
