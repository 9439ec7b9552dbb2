//! `calculate_retirement_benefit` mutation handler.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::accrual::AccrualRateProvider;
use crate::message::{CalculationMessage, MessageCode};
use crate::model::{DossierStatus, Situation};
use crate::properties::PropertyBag;

/// 365.25 days, as used by the service-years divisor.
fn days_per_year() -> Decimal {
    Decimal::new(36525, 2)
}

fn years_between(start: NaiveDate, end: NaiveDate) -> Decimal {
    let days = end.signed_duration_since(start).num_days();
    (Decimal::from(days) / days_per_year()).max(Decimal::ZERO)
}

/// Calendar-year age at `at`, adjusted down by one if the birthday for that
/// year hasn't occurred yet.
fn age_at(birth_date: NaiveDate, at: NaiveDate) -> i32 {
    let mut age = at.year() - birth_date.year();
    if (at.month(), at.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Picks the scheme whose policy contributes the most weighted salary
/// (`effective_salary * years`) to resolve a single accrual rate when
/// policies span more than one scheme. Ties keep the first-seen policy's
/// scheme, matching the engine's stable insertion-order processing.
fn dominant_scheme_id<'a>(contributions: &'a [(String, Decimal, Decimal)]) -> Option<&'a str> {
    contributions
        .iter()
        .map(|(scheme_id, effective_salary, years)| (scheme_id, *effective_salary * *years))
        .fold(None::<(&String, Decimal)>, |best, (scheme_id, weight)| {
            match best {
                Some((_, best_weight)) if best_weight >= weight => best,
                _ => Some((scheme_id, weight)),
            }
        })
        .map(|(scheme_id, _)| scheme_id.as_str())
}

pub fn handle(
    situation: &mut Situation,
    props: &PropertyBag,
    accrual_provider: &dyn AccrualRateProvider,
) -> Vec<CalculationMessage> {
    tracing::debug!(
        retirement_date = %props.date("retirement_date"),
        "handling calculate_retirement_benefit"
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
            "dossier has no policies",
        )];
    }

    let Some(participant) = dossier.participant() else {
        return vec![CalculationMessage::critical(
            MessageCode::NoParticipant,
            "dossier has no participant",
        )];
    };
    let birth_date = participant.birth_date;

    let retirement_date = props.date("retirement_date");

    let mut messages = vec![];
    let mut years_by_policy = Vec::with_capacity(dossier.policies.len());
    for policy in &dossier.policies {
        let years = years_between(policy.employment_start_date, retirement_date);
        if retirement_date < policy.employment_start_date {
            messages.push(CalculationMessage::warning(
                MessageCode::RetirementBeforeEmployment,
                format!(
                    "policy {} has an employment start date after the retirement date",
                    policy.policy_id
                ),
            ));
        }
        years_by_policy.push(years);
    }
    let total_years: Decimal = years_by_policy.iter().sum();

    let age = age_at(birth_date, retirement_date);
    let eligible = age >= 65 || total_years >= Decimal::from(40);
    if !eligible {
        messages.push(CalculationMessage::critical(
            MessageCode::NotEligible,
            format!(
                "participant is not eligible for retirement benefit: age {age}, service years {total_years}"
            ),
        ));
        return messages;
    }

    if total_years.is_zero() {
        for policy in dossier.policies.iter_mut() {
            policy.attainable_pension = Some(Decimal::ZERO);
        }
    } else {
        let contributions: Vec<(String, Decimal, Decimal)> = dossier
            .policies
            .iter()
            .zip(years_by_policy.iter())
            .map(|(policy, years)| {
                (
                    policy.scheme_id.clone(),
                    policy.salary * policy.part_time_factor,
                    *years,
                )
            })
            .collect();

        let weighted_salary_sum: Decimal = contributions
            .iter()
            .map(|(_, effective_salary, years)| *effective_salary * *years)
            .sum();
        let avg_salary = weighted_salary_sum / total_years;

        let accrual_rate = dominant_scheme_id(&contributions)
            .map(|scheme_id| accrual_provider.accrual_rate(scheme_id))
            .unwrap_or_else(crate::accrual::default_accrual_rate);

        let annual_pension = avg_salary * total_years * accrual_rate;

        for (policy, years) in dossier.policies.iter_mut().zip(years_by_policy.iter()) {
            policy.attainable_pension = Some(annual_pension * *years / total_years);
        }
    }

    dossier.status = DossierStatus::Retired;
    dossier.retirement_date = Some(retirement_date);

    messages
}
