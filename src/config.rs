// ⚙️ Configuration - data locations and vocabularies, optionally from JSON
//
// Every field has a default, so a config file only needs the keys it changes:
//
// {
//   "data_dir": "/var/lib/tally",
//   "disciplines": ["Portuguese", "Mathematics"],
//   "stock": { "owners": "items.csv", "measurements": "item_prices.csv" }
// }

use crate::input::ValueRule;
use crate::persistence::{Layout, Ledger};
use anyhow::{ensure, Context as AnyhowContext, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File names (relative to `data_dir`) for one persisted program
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSet {
    pub owners: String,
    pub measurements: String,
}

impl FileSet {
    fn new(owners: &str, measurements: &str) -> Self {
        FileSet {
            owners: owners.to_string(),
            measurements: measurements.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the CSV files live in
    pub data_dir: PathBuf,

    /// Grading vocabulary, in the order results are printed
    pub disciplines: Vec<String>,

    pub grade_min: u32,
    pub grade_max: u32,

    pub squad: FileSet,
    pub athletes: FileSet,
    pub stock: FileSet,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("."),
            disciplines: vec![
                "Portuguese".to_string(),
                "Mathematics".to_string(),
                "Science".to_string(),
            ],
            grade_min: 0,
            grade_max: 20,
            squad: FileSet::new("players.csv", "measures.csv"),
            athletes: FileSet::new("athletes.csv", "evaluations.csv"),
            stock: FileSet::new("products.csv", "prices.csv"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AppConfig = serde_json::from_str(&content)
            .context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Config file when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => AppConfig::from_file(path),
            None => Ok(AppConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.disciplines.is_empty(), "at least one discipline is required");
        ensure!(
            self.grade_min <= self.grade_max,
            "grade_min ({}) is above grade_max ({})",
            self.grade_min,
            self.grade_max
        );
        Ok(())
    }

    pub fn grade_rule(&self) -> ValueRule {
        ValueRule::Between(self.grade_min as f64, self.grade_max as f64)
    }

    fn ledger(&self, files: &FileSet, layout: Layout) -> Ledger {
        Ledger::new(
            self.data_dir.join(&files.owners),
            self.data_dir.join(&files.measurements),
            layout,
        )
    }

    pub fn squad_ledger(&self) -> Ledger {
        self.ledger(&self.squad, Layout::squad())
    }

    pub fn athletes_ledger(&self) -> Ledger {
        self.ledger(&self.athletes, Layout::athletes())
    }

    pub fn stock_ledger(&self) -> Ledger {
        self.ledger(&self.stock, Layout::stock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.disciplines.len(), 3);
        assert_eq!(config.grade_rule(), ValueRule::Between(0.0, 20.0));
        assert_eq!(
            config.stock_ledger().measurements_path,
            PathBuf::from("./prices.csv")
        );
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        fs::write(
            &path,
            r#"{ "data_dir": "/data", "stock": { "owners": "items.csv", "measurements": "item_prices.csv" } }"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.stock_ledger().owners_path, PathBuf::from("/data/items.csv"));
        assert_eq!(config.athletes, AppConfig::default().athletes);
        assert_eq!(config.grade_max, 20);
    }

    #[test]
    fn test_invalid_grade_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        fs::write(&path, r#"{ "grade_min": 10, "grade_max": 5 }"#).unwrap();

        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/definitely/not/here.json"))).is_err());
        assert!(AppConfig::load(None).is_ok());
    }
}
