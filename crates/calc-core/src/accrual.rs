//! Accrual-rate lookup abstraction.
//!
//! `calculate_retirement_benefit` needs the yearly accrual rate for a
//! scheme. The core stays network-free: it depends only on this trait. A
//! concrete, network-backed implementation lives in the separate
//! `calc-accrual` crate.

use rust_decimal::Decimal;

/// Looks up the yearly pension accrual rate for a scheme.
///
/// Implementations must not panic; an unreachable registry or unknown
/// scheme should fall back to [`default_accrual_rate`] rather than error.
pub trait AccrualRateProvider {
    fn accrual_rate(&self, scheme_id: &str) -> Decimal;
}

/// The rate used when no provider is configured, or a configured provider
/// cannot resolve a scheme: 2% per year of service.
pub fn default_accrual_rate() -> Decimal {
    Decimal::new(2, 2)
}

/// A provider that always returns [`default_accrual_rate`], used when no
/// scheme registry is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAccrualRateProvider;

impl AccrualRateProvider for DefaultAccrualRateProvider {
    fn accrual_rate(&self, _scheme_id: &str) -> Decimal {
        default_accrual_rate()
    }
}
