// 🏃 Sports group - athletes and their evaluations, backed by two CSV files

use super::{run_loop, CommandTable, Console, ShellError};
use crate::config::AppConfig;
use crate::entities::{Owner, Tags};
use crate::input::{parse_number, ValueRule};
use crate::store::{RecordStore, Selector};
use anyhow::Result;

fn add_athlete(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let name = console.prompt("Athlete name: ")?;
    let athlete = store.add_owner(&name)?;
    console.say(format!("Created athlete {}: {}", athlete.id, athlete.name))
}

fn add_evaluation(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let name = console.prompt("Athlete name: ")?;
    let athlete_id = store
        .find_owner_by_name(&name)
        .map(|a| a.id)
        .ok_or_else(|| ShellError::NotFound(format!("Athlete '{}'", name)))?;

    let value = parse_number("value", &console.prompt("Value: ")?, ValueRule::NonNegative)?;
    let evaluation = store.add_measurement(athlete_id, value, Tags::none())?;
    console.say(format!("Recorded evaluation {} for {}", evaluation.id, name))
}

fn view_athlete(store: &RecordStore, athlete: &Owner, console: &mut Console<'_>) -> Result<(), ShellError> {
    console.say(format!("Name: {}", athlete.name))?;
    console.say(format!("Id: {}", athlete.id))?;
    console.say("Evaluations:")?;
    for evaluation in store.measurements_for(Selector::Owner(athlete.id)) {
        console.say(format!(" - id: {}", evaluation.id))?;
        console.say(format!(" - value: {}", evaluation.value))?;
    }
    Ok(())
}

fn view(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let store: &RecordStore = store;
    console.say("Athletes:")?;
    console.blank()?;
    for athlete in store.owners() {
        view_athlete(store, athlete, console)?;
        console.blank()?;
    }
    Ok(())
}

pub fn commands() -> CommandTable<RecordStore> {
    CommandTable::new()
        .command("add athlete", add_athlete)
        .command("add evaluation", add_evaluation)
        .command("view", view)
        .help("help")
        .quit("quit")
}

pub fn run(config: &AppConfig, console: &mut Console<'_>) -> Result<()> {
    let ledger = config.athletes_ledger();
    let mut store = ledger.load()?;

    run_loop(&mut store, &commands(), console)?;

    ledger.save(&store)?;
    Ok(())
}
