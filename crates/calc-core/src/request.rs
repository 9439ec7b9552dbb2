//! External request contract: the JSON body accepted at the request boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level calculation request: a tenant-scoped dossier plus the ordered
/// list of mutations to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub tenant_id: String,
    pub dossier_id: String,
    pub calculation_instructions: CalculationInstructions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInstructions {
    pub mutations: Vec<Mutation>,
}

/// A single mutation entry. `mutation_properties` is captured verbatim
/// (including any fields the engine doesn't recognize) so it can be echoed
/// back unchanged in the response's `mutations` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub mutation_id: String,
    pub mutation_definition_name: String,
    pub mutation_type: String,
    pub actual_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dossier_id: Option<String>,
    #[serde(default)]
    pub mutation_properties: serde_json::Map<String, serde_json::Value>,
}
