//! `add_policy` mutation handler.

use rust_decimal::Decimal;

use crate::message::{CalculationMessage, MessageCode};
use crate::model::{Policy, Situation};
use crate::properties::PropertyBag;

pub fn handle(situation: &mut Situation, props: &PropertyBag) -> Vec<CalculationMessage> {
    tracing::debug!(scheme_id = %props.string("scheme_id"), "handling add_policy");

    let Some(dossier) = situation.dossier.as_mut() else {
        return vec![CalculationMessage::critical(
            MessageCode::DossierNotFound,
            "no dossier exists in this situation",
        )];
    };

    let salary = props.decimal("salary");
    if salary < Decimal::ZERO {
        return vec![CalculationMessage::critical(
            MessageCode::InvalidSalary,
            "salary must not be negative",
        )];
    }

    let part_time_factor = props.decimal("part_time_factor");
    if part_time_factor < Decimal::ZERO || part_time_factor > Decimal::ONE {
        return vec![CalculationMessage::critical(
            MessageCode::InvalidPartTimeFactor,
            "part_time_factor must be within [0, 1]",
        )];
    }

    let scheme_id = props.string("scheme_id");
    let employment_start_date = props.date("employment_start_date");

    let mut messages = vec![];
    let is_duplicate = dossier
        .policies
        .iter()
        .any(|p| p.scheme_id == scheme_id && p.employment_start_date == employment_start_date);
    if is_duplicate {
        messages.push(CalculationMessage::warning(
            MessageCode::DuplicatePolicy,
            "a policy with the same scheme_id and employment_start_date already exists",
        ));
    }

    let policy_id = dossier.next_policy_id();
    dossier.policies.push(Policy {
        policy_id,
        scheme_id,
        employment_start_date,
        salary,
        part_time_factor,
        attainable_pension: None,
        projections: None,
    });

    messages
}
