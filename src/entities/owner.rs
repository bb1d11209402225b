// 👤 Owner Entity - the parent record (player, athlete, product, student)
//
// Identity is the integer id handed out by the store; the name is unique
// within one store but that is the store's job to enforce, not ours.

use crate::error::RecordError;
use csv::StringRecord;

use super::parse_field;

/// Columns written for every owner file, in order.
pub const OWNER_HEADER: [&str; 2] = ["id", "name"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Stable identity, always >= 1
    pub id: u32,

    pub name: String,
}

impl Owner {
    /// Build an owner, rejecting a zero id or a blank name
    pub fn new(id: u32, name: impl Into<String>) -> Result<Self, RecordError> {
        let name = name.into();

        if id == 0 {
            return Err(RecordError::InvalidId { field: "id", value: id });
        }
        if name.trim().is_empty() {
            return Err(RecordError::BlankName);
        }

        Ok(Owner { id, name })
    }

    /// Parse one positional CSV row (`id,name`)
    pub fn from_record(record: &StringRecord) -> Result<Self, RecordError> {
        if record.len() != OWNER_HEADER.len() {
            return Err(RecordError::ColumnCount {
                expected: OWNER_HEADER.len(),
                found: record.len(),
            });
        }

        let id = parse_field::<u32>(OWNER_HEADER[0], &record[0])?;
        Owner::new(id, &record[1])
    }

    pub fn to_record(&self) -> StringRecord {
        StringRecord::from(vec![self.id.to_string(), self.name.clone()])
    }
}
