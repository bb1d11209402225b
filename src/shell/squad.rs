// ⚽ Squad - players, per-session measures, statistics and recommendations
//
// Rounds repeat until the user stops: read a batch of players, print the
// statistics for every metric, ask whether to stop. The squad is persisted
// on a normal exit only.

use super::{Console, ShellError};
use crate::aggregate::{all_group_stats, GroupStats};
use crate::config::AppConfig;
use crate::entities::Tags;
use crate::error::{RecordError, StoreError};
use crate::input::{parse_integer, ValueRule};
use crate::store::RecordStore;
use anyhow::Result;
use log::info;

// ============================================================================
// METRICS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Goals,
    Assists,
    Saves,
    MinutesPlayed,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Goals,
        Metric::Assists,
        Metric::Saves,
        Metric::MinutesPlayed,
    ];

    /// Group key stored in the measures file
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Goals => "goals",
            Metric::Assists => "assists",
            Metric::Saves => "saves",
            Metric::MinutesPlayed => "minutes_played",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Goals => "Goals",
            Metric::Assists => "Assists",
            Metric::Saves => "Saves",
            Metric::MinutesPlayed => "Minutes played",
        }
    }

    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn praise(&self, name: &str) -> String {
        match self {
            Metric::Goals => format!("{} did well in goals and deserves recognition.", name),
            Metric::Assists => format!("{} did well in assists and deserves recognition.", name),
            Metric::Saves => format!(
                "{} was excellent in saves and deserves recognition for a solid defence.",
                name
            ),
            Metric::MinutesPlayed => format!(
                "{} was excellent in minutes played and deserves recognition for the time on the pitch.",
                name
            ),
        }
    }

    pub fn critique(&self, name: &str) -> String {
        match self {
            Metric::Goals => format!("{} has to improve their performance in goals.", name),
            Metric::Assists => format!("{} has to improve their performance in assists.", name),
            Metric::Saves => format!(
                "{} can improve their defensive performance and should contribute more to the team.",
                name
            ),
            Metric::MinutesPlayed => format!(
                "{} can improve their minutes played and should contribute more to the team.",
                name
            ),
        }
    }
}

fn metric_keys() -> Vec<&'static str> {
    Metric::ALL.iter().map(Metric::key).collect()
}

// ============================================================================
// INPUT
// ============================================================================

/// Prompt for a name until it is new to the squad and not blank
fn read_new_player(store: &mut RecordStore, console: &mut Console<'_>) -> Result<u32, ShellError> {
    loop {
        let name = console.prompt("Name: ")?;
        match store.add_owner(&name) {
            Ok(player) => return Ok(player.id),
            Err(e @ StoreError::DuplicateName(_))
            | Err(e @ StoreError::Record(RecordError::BlankName)) => {
                console.say(format!("{}, pick another name", e))?
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn read_measures(store: &mut RecordStore, player_id: u32, console: &mut Console<'_>) -> Result<(), ShellError> {
    let session_id = parse_integer("session", &console.prompt("Session: ")?, ValueRule::Positive)?;

    for metric in Metric::ALL {
        let text = console.prompt(&format!("{}: ", metric.label()))?;
        let value = parse_integer(metric.key(), &text, ValueRule::Positive)?;
        store.add_measurement(
            player_id,
            value as f64,
            Tags::group(metric.key()).session(session_id),
        )?;
    }
    Ok(())
}

fn read_player(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let player_id = read_new_player(store, console)?;
    read_measures(store, player_id, console)
}

fn add_players(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let count = parse_integer(
        "number of players",
        &console.prompt("Number of players: ")?,
        ValueRule::NonNegative,
    )?;

    for _ in 0..count {
        console.say(format!("Player {}:", store.owner_count() + 1))?;

        // a player is kept only with the session and all four measures
        let checkpoint = store.checkpoint();
        if let Err(e) = read_player(store, console) {
            store.rollback(checkpoint);
            return Err(e);
        }
    }
    Ok(())
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_statistics(stats: &[GroupStats], console: &mut Console<'_>) -> Result<(), ShellError> {
    for group in stats {
        let label = Metric::from_key(&group.group_key).map_or(group.group_key.as_str(), |m| m.label());
        console.blank()?;
        console.say(format!("Statistics for {}:", label))?;
        console.say(format!("Average: {:.2}", group.mean))?;
        console.say(format!(
            "Maximum: {} (best performance: {})",
            group.best.value, group.best.name
        ))?;
        console.say(format!(
            "Minimum: {} (worst performance: {})",
            group.worst.value, group.worst.name
        ))?;
    }
    Ok(())
}

fn print_recommendations(stats: &[GroupStats], console: &mut Console<'_>) -> Result<(), ShellError> {
    console.blank()?;
    console.say("Recommendations:")?;
    for group in stats {
        if let Some(metric) = Metric::from_key(&group.group_key) {
            console.say(metric.praise(&group.best.name))?;
            console.say(metric.critique(&group.worst.name))?;
        }
    }
    Ok(())
}

/// Statistics and recommendations for every metric, in metric order
pub fn report(store: &RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let stats = all_group_stats(store, &metric_keys())?;
    print_statistics(&stats, console)?;
    print_recommendations(&stats, console)
}

// ============================================================================
// SESSION
// ============================================================================

/// Run rounds against `store` until the user stops or input ends
pub fn session(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    loop {
        match add_players(store, console) {
            Ok(()) => {}
            Err(ShellError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e),
        }

        match report(store, console) {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => console.say(&e)?,
            Err(e) => return Err(e),
        }

        console.blank()?;
        match console.prompt("Stop (y/n)? ") {
            Ok(answer) if answer.eq_ignore_ascii_case("y") => return Ok(()),
            Ok(_) => {}
            Err(ShellError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

pub fn run(config: &AppConfig, console: &mut Console<'_>) -> Result<()> {
    let ledger = config.squad_ledger();
    let mut store = ledger.load()?;
    info!("squad has {} players", store.owner_count());

    session(&mut store, console)?;

    ledger.save(&store)?;
    Ok(())
}
