//! Domain model for the pension situation.
//!
//! Plain data structs with `serde` derives, grouped by concern, with no
//! behavior beyond small accessor helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of a dossier: `ACTIVE` until a retirement benefit calculation
/// succeeds, `RETIRED` afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DossierStatus {
    Active,
    Retired,
}

impl Default for DossierStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Role of a person within a dossier. Only `PARTICIPANT` is populated by the
/// mutations this engine implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonRole {
    Participant,
}

/// Single-dossier container mutated by the evaluation engine.
///
/// Invariant: at most one dossier per situation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    /// Always serialized, explicit `null` when empty — the response
    /// contract distinguishes "no dossier yet" from a missing key.
    #[serde(default)]
    pub dossier: Option<Dossier>,
}

/// The pension case: persons and policies under a single dossier identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    pub dossier_id: String,
    pub status: DossierStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirement_date: Option<NaiveDate>,
    pub persons: Vec<Person>,
    pub policies: Vec<Policy>,
}

impl Dossier {
    /// Returns the dossier's sole `PARTICIPANT`, if one exists.
    pub fn participant(&self) -> Option<&Person> {
        self.persons.iter().find(|p| p.role == PersonRole::Participant)
    }

    /// Allocates the next sequential policy id for this dossier.
    ///
    /// `policy_id = "{dossier_id}-{n}"` where `n` is the 1-based insertion
    /// position of the new policy.
    pub fn next_policy_id(&self) -> String {
        format!("{}-{}", self.dossier_id, self.policies.len() + 1)
    }
}

/// A natural person attached to a dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub person_id: String,
    pub role: PersonRole,
    pub name: String,
    pub birth_date: NaiveDate,
}

/// A single employment record under a dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub policy_id: String,
    pub scheme_id: String,
    pub employment_start_date: NaiveDate,
    pub salary: Decimal,
    pub part_time_factor: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attainable_pension: Option<Decimal>,
    /// Reserved extension point; never written by the core handlers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projections: Option<serde_json::Value>,
}
