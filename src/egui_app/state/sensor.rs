use crate::inference::AnomalyResult;
use crate::sensors::{SensorField, SensorHistory, SensorInput};

/// UI state for the sensor monitoring panel.
#[derive(Clone, Debug)]
pub struct SensorPanelState {
    /// Parsed values submitted on analyze.
    pub input: SensorInput,
    /// Raw text of each field, indexed by [`SensorField::index`].
    pub field_text: [String; 3],
    pub result: Option<AnomalyResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub history: SensorHistory,
}

impl SensorPanelState {
    pub fn new(history_capacity: usize) -> Self {
        let input = SensorInput::default();
        Self {
            field_text: SensorField::ALL.map(|field| input.get(field).to_string()),
            input,
            result: None,
            loading: false,
            error: None,
            history: SensorHistory::with_capacity(history_capacity),
        }
    }

    pub fn field_text(&self, field: SensorField) -> &str {
        &self.field_text[field.index()]
    }
}
