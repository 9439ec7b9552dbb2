//! External response contract: the JSON body returned at the request boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::CalculationMessage;
use crate::model::Situation;
use crate::request::Mutation;

/// Outcome discriminant for a calculation: `SUCCESS` if every mutation
/// applied cleanly, `FAILURE` if any mutation produced a `CRITICAL` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationOutcome {
    Success,
    Failure,
}

/// Full response body returned for a calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub calculation_metadata: CalculationMetadata,
    pub calculation_result: CalculationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationMetadata {
    pub calculation_id: Uuid,
    pub tenant_id: String,
    pub calculation_started_at: chrono::DateTime<chrono::Utc>,
    pub calculation_completed_at: chrono::DateTime<chrono::Utc>,
    pub calculation_duration_ms: i64,
    pub calculation_outcome: CalculationOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub messages: Vec<CalculationMessage>,
    pub mutations: Vec<MutationRecord>,
    pub initial_situation: InitialSituation,
    pub end_situation: EndSituation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialSituation {
    pub actual_at: NaiveDate,
    pub situation: Situation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndSituation {
    pub mutation_id: String,
    pub mutation_index: usize,
    pub actual_at: NaiveDate,
    pub situation: Situation,
}

/// One attempted mutation: the original payload verbatim, plus the index
/// range into `messages` it contributed (`None` if it produced none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub mutation: Mutation,
    pub calculation_message_indexes: Option<Vec<usize>>,
}
