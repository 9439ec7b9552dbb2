//! `apply_indexation` mutation handler.

use rust_decimal::Decimal;

use crate::message::{CalculationMessage, MessageCode};
use crate::model::Situation;
use crate::properties::PropertyBag;

pub fn handle(situation: &mut Situation, props: &PropertyBag) -> Vec<CalculationMessage> {
    tracing::debug!(
        scheme_id = ?props.nullable_string("scheme_id"),
        "handling apply_indexation"
    );

    let Some(dossier) = situation.dossier.as_mut() else {
        return vec![CalculationMessage::critical(
            MessageCode::DossierNotFound,
            "no dossier exists in this situation",
        )];
    };

    if dossier.policies.is_empty() {
        return vec![CalculationMessage::critical(
            MessageCode::NoPolicies,
            "dossier has no policies to index",
        )];
    }

    let scheme_id = props.nullable_string("scheme_id");
    let effective_before = props.nullable_date("effective_before");
    let any_filter_specified = scheme_id.is_some() || effective_before.is_some();

    let selected: Vec<usize> = dossier
        .policies
        .iter()
        .enumerate()
        .filter(|(_, p)| scheme_id.as_ref().is_none_or(|s| &p.scheme_id == s))
        .filter(|(_, p)| {
            effective_before
                .is_none_or(|before| p.employment_start_date < before)
        })
        .map(|(i, _)| i)
        .collect();

    if any_filter_specified && selected.is_empty() {
        return vec![CalculationMessage::warning(
            MessageCode::NoMatchingPolicies,
            "no policies matched the indexation filters",
        )];
    }

    let percentage = props.decimal("percentage");
    let mut clamped = false;
    for &i in &selected {
        let policy = &mut dossier.policies[i];
        let new_salary = policy.salary * (Decimal::ONE + percentage);
        if new_salary < Decimal::ZERO {
            policy.salary = Decimal::ZERO;
            clamped = true;
        } else {
            policy.salary = new_salary;
        }
    }

    if clamped {
        vec![CalculationMessage::warning(
            MessageCode::NegativeSalaryClamped,
            "one or more policy salaries were clamped to zero after indexation",
        )]
    } else {
        vec![]
    }
}
