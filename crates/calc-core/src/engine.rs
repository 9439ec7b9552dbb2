//! Evaluation engine: owns the mutable situation, dispatches mutations in
//! order, and assembles the final response.
//!
//! Dispatch is a plain `match` on `mutation_definition_name` rather than a
//! trait-object registry — a closed, small set of mutation kinds doesn't
//! earn the indirection.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::accrual::AccrualRateProvider;
use crate::handlers;
use crate::message::{CalculationMessage, MessageCode};
use crate::model::Situation;
use crate::request::CalculationRequest;
use crate::response::{
    CalculationMetadata, CalculationOutcome, CalculationResponse, CalculationResult,
    EndSituation, InitialSituation, MutationRecord,
};

/// Construction-time misuse of the engine — not a business outcome.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("calculation_instructions.mutations must contain at least one mutation")]
    EmptyMutationList,
}

/// Evaluates a calculation request against a fresh, empty situation.
///
/// `cancellation` is polled between mutations; when it returns `true` the
/// loop stops early and the response reports `FAILURE`.
pub fn evaluate_request(
    request: &CalculationRequest,
    accrual_provider: &dyn AccrualRateProvider,
    cancellation: &dyn Fn() -> bool,
) -> Result<CalculationResponse, EngineError> {
    let mutations = &request.calculation_instructions.mutations;
    let Some(first_mutation) = mutations.first() else {
        return Err(EngineError::EmptyMutationList);
    };
    let initial_actual_at = first_mutation.actual_at;

    let started_at = Utc::now();
    let started_instant = Instant::now();

    let mut situation = Situation::default();
    let mut messages: Vec<CalculationMessage> = vec![];
    let mut records: Vec<MutationRecord> = vec![];

    let mut last_ok_mutation_id = first_mutation.mutation_id.clone();
    let mut last_ok_mutation_index: usize = 0;
    let mut last_ok_actual_at: NaiveDate = initial_actual_at;

    let mut outcome = CalculationOutcome::Success;

    for (index, mutation) in mutations.iter().enumerate() {
        if index > 0 && cancellation() {
            outcome = CalculationOutcome::Failure;
            break;
        }

        let m_start = messages.len();
        let produced = dispatch(&mut situation, mutation, accrual_provider);
        let has_critical = produced.iter().any(CalculationMessage::is_critical);
        messages.extend(produced);
        let m_end = messages.len();

        records.push(MutationRecord {
            mutation: mutation.clone(),
            calculation_message_indexes: if m_end > m_start {
                Some((m_start..m_end).collect())
            } else {
                None
            },
        });

        if has_critical {
            outcome = CalculationOutcome::Failure;
            break;
        }

        last_ok_mutation_id = mutation.mutation_id.clone();
        last_ok_mutation_index = index;
        last_ok_actual_at = mutation.actual_at;
    }

    let completed_at = Utc::now();
    let duration_ms = started_instant.elapsed().as_millis() as i64;

    Ok(CalculationResponse {
        calculation_metadata: CalculationMetadata {
            calculation_id: Uuid::new_v4(),
            tenant_id: request.tenant_id.clone(),
            calculation_started_at: started_at,
            calculation_completed_at: completed_at,
            calculation_duration_ms: duration_ms,
            calculation_outcome: outcome,
        },
        calculation_result: CalculationResult {
            messages,
            mutations: records,
            initial_situation: InitialSituation {
                actual_at: initial_actual_at,
                situation: Situation::default(),
            },
            end_situation: EndSituation {
                mutation_id: last_ok_mutation_id,
                mutation_index: last_ok_mutation_index,
                actual_at: last_ok_actual_at,
                situation,
            },
        },
    })
}

fn dispatch(
    situation: &mut Situation,
    mutation: &crate::request::Mutation,
    accrual_provider: &dyn AccrualRateProvider,
) -> Vec<CalculationMessage> {
    tracing::debug!(
        mutation_id = %mutation.mutation_id,
        mutation_definition_name = %mutation.mutation_definition_name,
        "dispatching mutation"
    );

    let props = crate::properties::PropertyBag::new(&mutation.mutation_properties);
    let messages = match mutation.mutation_definition_name.as_str() {
        "create_dossier" => handlers::create_dossier::handle(situation, &props),
        "add_policy" => handlers::add_policy::handle(situation, &props),
        "apply_indexation" => handlers::apply_indexation::handle(situation, &props),
        "calculate_retirement_benefit" => {
            handlers::calculate_retirement_benefit::handle(situation, &props, accrual_provider)
        }
        other => {
            tracing::warn!(mutation_definition_name = other, "unknown mutation_definition_name");
            vec![CalculationMessage::critical(
                MessageCode::UnknownMutation,
                format!("unknown mutation_definition_name: {other}"),
            )]
        }
    };

    for message in &messages {
        match message.severity {
            crate::message::Severity::Critical => {
                tracing::info!(
                    mutation_id = %mutation.mutation_id,
                    code = ?message.code,
                    "mutation produced a CRITICAL message"
                );
            }
            crate::message::Severity::Warning => {
                tracing::debug!(
                    mutation_id = %mutation.mutation_id,
                    code = ?message.code,
                    "mutation produced a WARNING message"
                );
            }
        }
    }

    messages
}
