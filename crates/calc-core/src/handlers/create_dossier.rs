//! `create_dossier` mutation handler.

use chrono::Utc;

use crate::message::{CalculationMessage, MessageCode};
use crate::model::{Dossier, DossierStatus, Person, PersonRole, Situation};
use crate::properties::{invalid_date, PropertyBag};

pub fn handle(situation: &mut Situation, props: &PropertyBag) -> Vec<CalculationMessage> {
    tracing::debug!(dossier_id = %props.string("dossier_id"), "handling create_dossier");

    if situation.dossier.is_some() {
        return vec![CalculationMessage::critical(
            MessageCode::DossierAlreadyExists,
            "a dossier already exists in this situation",
        )];
    }

    let name = props.string("name");
    if name.trim().is_empty() {
        return vec![CalculationMessage::critical(
            MessageCode::InvalidName,
            "name must not be empty or whitespace",
        )];
    }

    let birth_date = props.date("birth_date");
    let today = Utc::now().date_naive();
    if birth_date == invalid_date() || birth_date > today {
        return vec![CalculationMessage::critical(
            MessageCode::InvalidBirthDate,
            "birth_date must be a valid date not in the future",
        )];
    }

    situation.dossier = Some(Dossier {
        dossier_id: props.string("dossier_id"),
        status: DossierStatus::Active,
        retirement_date: None,
        persons: vec![Person {
            person_id: props.string("person_id"),
            role: PersonRole::Participant,
            name,
            birth_date,
        }],
        policies: vec![],
    });

    vec![]
}
