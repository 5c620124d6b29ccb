//! ListFieldsHandler - Query handler for the questionnaire definition.

use crate::domain::intake::{FieldSpec, IntakeEngine};

/// Handler returning the ordered field registry, for form front-ends.
pub struct ListFieldsHandler {
    engine: IntakeEngine,
}

impl ListFieldsHandler {
    pub fn new(engine: IntakeEngine) -> Self {
        Self { engine }
    }

    pub fn handle(&self) -> &'static [FieldSpec] {
        self.engine.registry().fields()
    }
}
