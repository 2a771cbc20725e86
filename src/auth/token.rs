use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: f64,
}

/// Whether `token` should be treated as expired right now.
///
/// Anything that is not a three-segment token with a decodable JSON payload
/// carrying a numeric `exp` counts as expired.
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, Utc::now())
}

pub fn is_token_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match expiry_millis(token) {
        Some(exp_ms) => exp_ms < now.timestamp_millis() as f64,
        None => true,
    }
}

fn expiry_millis(token: &str) -> Option<f64> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() || payload.is_empty() {
        return None;
    }

    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    claim.exp.is_finite().then_some(claim.exp * 1000.0)
}
