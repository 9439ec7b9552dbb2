//! HTTP-backed [`AccrualRateProvider`] querying an external scheme registry.
//!
//! Kept out of `calc-core` so the core stays network-free and synchronous
//! in the purest sense; this crate is the one place the engine's pure
//! business logic touches a socket.

use std::time::Duration;

use calc_core::AccrualRateProvider;
use rust_decimal::Decimal;
use serde::Deserialize;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct SchemeResponse {
    #[allow(dead_code)]
    scheme_id: String,
    accrual_rate: Decimal,
}

/// Looks up `GET {base_url}/schemes/{scheme_id}` for a per-scheme accrual
/// rate. Any failure — network error, timeout, non-2xx status, or a body
/// that doesn't parse — falls back to [`calc_core::default_accrual_rate`].
pub struct HttpAccrualRateProvider {
    base_url: String,
}

impl HttpAccrualRateProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn fetch(&self, scheme_id: &str) -> Result<Decimal, ureq::Error> {
        let url = format!("{}/schemes/{}", self.base_url.trim_end_matches('/'), scheme_id);
        let scheme: SchemeResponse = ureq::get(&url)
            .config()
            .timeout_global(Some(LOOKUP_TIMEOUT))
            .build()
            .call()?
            .body_mut()
            .read_json()?;
        Ok(scheme.accrual_rate)
    }
}

impl AccrualRateProvider for HttpAccrualRateProvider {
    fn accrual_rate(&self, scheme_id: &str) -> Decimal {
        match self.fetch(scheme_id) {
            Ok(rate) => rate,
            Err(error) => {
                tracing::warn!(scheme_id, %error, "scheme registry lookup failed, falling back to default accrual rate");
                calc_core::default_accrual_rate()
            }
        }
    }
}
