//! Mutation evaluation engine for pension situation calculations.
//!
//! This crate has no I/O: it consumes a [`request::CalculationRequest`] and
//! produces a [`response::CalculationResponse`], synchronously and
//! deterministically given its inputs and an [`accrual::AccrualRateProvider`].

pub mod accrual;
pub mod engine;
pub mod handlers;
pub mod message;
pub mod model;
pub mod properties;
pub mod request;
pub mod response;

pub use accrual::{default_accrual_rate, AccrualRateProvider, DefaultAccrualRateProvider};
pub use engine::{evaluate_request, EngineError};
pub use message::{CalculationMessage, MessageCode, Severity};
pub use model::{Dossier, DossierStatus, Person, PersonRole, Policy, Situation};
pub use request::{CalculationInstructions, CalculationRequest, Mutation};
pub use response::{
    CalculationMetadata, CalculationOutcome, CalculationResponse, CalculationResult,
    EndSituation, InitialSituation, MutationRecord,
};
