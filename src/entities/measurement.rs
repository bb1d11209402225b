// 📏 Measurement Entity - a numeric value recorded against an owner
//
// Covers squad measures (metric + training session), athlete evaluations,
// product prices and student grades. The optional group key is what the
// aggregator partitions on.

use crate::error::RecordError;
use crate::persistence::Layout;
use csv::StringRecord;

use super::parse_field;

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: u32,

    /// Foreign key into the owner collection (not checked at write time)
    pub owner_id: u32,

    pub value: f64,

    /// Grouping key such as a metric or discipline
    pub group: Option<String>,

    /// Training session the value was recorded in
    pub session_id: Option<u32>,
}

/// Optional extras attached when a measurement is added to a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub group: Option<String>,
    pub session_id: Option<u32>,
}

impl Tags {
    pub fn none() -> Self {
        Tags::default()
    }

    pub fn group(key: impl Into<String>) -> Self {
        Tags {
            group: Some(key.into()),
            session_id: None,
        }
    }

    pub fn session(mut self, session_id: u32) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

impl Measurement {
    /// Build a measurement, rejecting zero ids and negative or non-finite values
    pub fn new(id: u32, owner_id: u32, value: f64) -> Result<Self, RecordError> {
        if id == 0 {
            return Err(RecordError::InvalidId { field: "id", value: id });
        }
        if owner_id == 0 {
            return Err(RecordError::InvalidId {
                field: "owner_id",
                value: owner_id,
            });
        }
        if !value.is_finite() || value < 0.0 {
            return Err(RecordError::InvalidValue(value));
        }

        Ok(Measurement {
            id,
            owner_id,
            value,
            group: None,
            session_id: None,
        })
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_session(mut self, session_id: u32) -> Result<Self, RecordError> {
        if session_id == 0 {
            return Err(RecordError::InvalidId {
                field: "session_id",
                value: session_id,
            });
        }
        self.session_id = Some(session_id);
        Ok(self)
    }

    /// Apply store-level tags (group key and session id)
    pub fn with_tags(self, tags: Tags) -> Result<Self, RecordError> {
        let mut measurement = match tags.group {
            Some(group) => self.with_group(group),
            None => self,
        };
        if let Some(session_id) = tags.session_id {
            measurement = measurement.with_session(session_id)?;
        }
        Ok(measurement)
    }

    /// Parse one positional CSV row described by `layout`
    ///
    /// Empty group/session cells are read back as `None`.
    pub fn from_record(layout: &Layout, record: &StringRecord) -> Result<Self, RecordError> {
        let columns = layout.measurement_header();
        if record.len() != columns.len() {
            return Err(RecordError::ColumnCount {
                expected: columns.len(),
                found: record.len(),
            });
        }

        let id = parse_field::<u32>(columns[0], &record[0])?;
        let owner_id = parse_field::<u32>(columns[1], &record[1])?;
        let value = parse_field::<f64>(columns[2], &record[2])?;
        let mut measurement = Measurement::new(id, owner_id, value)?;

        let mut next = 3;
        if layout.group_column.is_some() {
            let cell = record[next].trim();
            if !cell.is_empty() {
                measurement = measurement.with_group(cell);
            }
            next += 1;
        }
        if layout.session_column.is_some() {
            let cell = record[next].trim();
            if !cell.is_empty() {
                let session_id = parse_field::<u32>(columns[next], cell)?;
                measurement = measurement.with_session(session_id)?;
            }
        }

        Ok(measurement)
    }

    pub fn to_record(&self, layout: &Layout) -> StringRecord {
        let mut fields = vec![
            self.id.to_string(),
            self.owner_id.to_string(),
            self.value.to_string(),
        ];
        if layout.group_column.is_some() {
            fields.push(self.group.clone().unwrap_or_default());
        }
        if layout.session_column.is_some() {
            fields.push(self.session_id.map(|s| s.to_string()).unwrap_or_default());
        }
        StringRecord::from(fields)
    }
}
