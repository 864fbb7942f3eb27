use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for a field whose element was not found in a detail block.
pub const MISSING: &str = "N/A";

/// The five values read out of every class detail block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Building,
    Room,
    Days,
    StartTime,
    EndTime,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Building,
        Field::Room,
        Field::Days,
        Field::StartTime,
        Field::EndTime,
    ];

    /// CSS selector of the element holding this field inside a detail block.
    pub fn selector(self) -> &'static str {
        match self {
            Field::Building => ".class_building",
            Field::Room => ".class_room",
            Field::Days => ".class_days",
            Field::StartTime => ".class_start_time",
            Field::EndTime => ".class_end_time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Building => "building",
            Field::Room => "room",
            Field::Days => "days",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
        };
        f.write_str(name)
    }
}

/// Strip a `label:` prefix from rendered field text.
///
/// Everything after the last colon is kept, so `"Building: Amador Hall"`
/// becomes `"Amador Hall"` and text with no colon is only trimmed.
pub fn field_value(raw: &str) -> String {
    raw.rsplit(':').next().unwrap_or(raw).trim().to_string()
}

/// Field values read from one detail block, not yet given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFields {
    pub building: String,
    pub room: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
}

impl ClassFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Building => &self.building,
            Field::Room => &self.room,
            Field::Days => &self.days,
            Field::StartTime => &self.start_time,
            Field::EndTime => &self.end_time,
        }
    }

    /// Fields that resolved to [`MISSING`].
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f) == MISSING)
            .collect()
    }
}

/// One accepted class section as written to the schedule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: u64,
    pub building: String,
    pub room: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub time_range: String,
}

impl ClassRecord {
    pub fn new(id: u64, fields: ClassFields) -> Self {
        let time_range = format!("{} - {}", fields.start_time, fields.end_time);
        Self {
            id,
            building: fields.building,
            room: fields.room,
            days: fields.days,
            start_time: fields.start_time,
            end_time: fields.end_time,
            time_range,
        }
    }
}

/// Every record accepted so far in a run, in acceptance order.
#[derive(Debug, Default)]
pub struct ScheduleSnapshot {
    records: Vec<ClassRecord>,
}

impl ScheduleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a complete block, assigning it the next id. Blocks with a
    /// missing field are handed back untouched and consume no id.
    pub fn accept(&mut self, fields: ClassFields) -> Result<&ClassRecord, ClassFields> {
        if !fields.missing().is_empty() {
            return Err(fields);
        }
        let id = self.records.len() as u64 + 1;
        self.records.push(ClassRecord::new(id, fields));
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[ClassRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(room: &str) -> ClassFields {
        ClassFields {
            building: "Amador Hall".into(),
            room: room.into(),
            days: "MWF".into(),
            start_time: "9".into(),
            end_time: "10".into(),
        }
    }

    #[test]
    fn strips_label_prefix() {
        assert_eq!(field_value("Building: Amador Hall"), "Amador Hall");
        assert_eq!(field_value("  Room:  203 \n"), "203");
        assert_eq!(field_value("MWF"), "MWF");
    }

    #[test]
    fn keeps_text_after_last_colon() {
        assert_eq!(field_value("Start: 10:30"), "30");
    }

    #[test]
    fn snapshot_assigns_ids_only_to_complete_blocks() {
        let mut snapshot = ScheduleSnapshot::new();
        assert_eq!(snapshot.accept(fields("101")).unwrap().id, 1);
        let rejected = snapshot.accept(fields(MISSING)).unwrap_err();
        assert_eq!(rejected.missing(), vec![Field::Room]);
        assert_eq!(snapshot.accept(fields("102")).unwrap().id, 2);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn time_range_joins_start_and_end() {
        let record = ClassRecord::new(7, fields("101"));
        assert_eq!(record.time_range, "9 - 10");
    }
}
