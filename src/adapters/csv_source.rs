use crate::domain::model::ControlVariable;
use crate::domain::record::VariableRecord;
use crate::utils::error::{PlotError, Result};
use csv::{ReaderBuilder, Trim};

/// Parses the boundaries data table.
///
/// Expected headers: `control_variable, baseline, current_value,
/// planetary_boundary, upper_limit`, optionally `min` and `max`. Other columns
/// are ignored.
pub fn parse_records(data: &[u8]) -> Result<Vec<VariableRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(data);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: VariableRecord = row?;
        records.push(record);
    }

    tracing::debug!("Parsed {} control variable rows", records.len());
    Ok(records)
}

/// Rows of the data table, looked up by control variable label.
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    records: Vec<VariableRecord>,
}

impl RowTable {
    pub fn new(records: Vec<VariableRecord>) -> Self {
        Self { records }
    }

    pub fn from_csv(data: &[u8]) -> Result<Self> {
        Ok(Self::new(parse_records(data)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.control_variable.as_str())
    }

    pub fn record(&self, label: &str) -> Option<&VariableRecord> {
        self.records.iter().find(|r| r.control_variable == label)
    }

    /// Builds the control variable from the first row carrying `label`.
    pub fn variable(&self, label: &str) -> Result<ControlVariable> {
        self.record(label)
            .ok_or_else(|| PlotError::VariableNotFound {
                label: label.to_string(),
            })?
            .to_control_variable()
    }
}
