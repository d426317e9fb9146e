//! Response interpretation
//!
//! Pure mapping from a raw HTTP response to a [`SessionOutcome`]. No I/O
//! happens here; the client hands over status and body after the exchange.
//!
//! The processor wraps every response in the same envelope:
//! `{ "result": bool, "message": string?, "data": { "url": string?, "id": string? } }`.
//! Session creation answers with `data.url`, confirmation and refund
//! payloads answer with `data.id`.

use crate::payments::types::{RawResponse, SessionOutcome};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    result: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<EnvelopeData>,
}

#[derive(Debug, Default, Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

/// Interpret one processor response.
///
/// A missing `result` field, a wrong field type, or a non-2xx status each
/// map to their own variant; none of them is ever read as a decline.
/// A truthy `result` without a usable `url` or `id` is ambiguous and maps
/// to `MalformedResponse`, never silently to success.
pub fn interpret(response: &RawResponse) -> SessionOutcome {
    if !(200..300).contains(&response.status) {
        return SessionOutcome::TransportError {
            message: format!("HTTP {}: {}", response.status, response.body),
        };
    }

    let envelope: Envelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(_) => {
            return SessionOutcome::MalformedResponse {
                raw: response.body.clone(),
            }
        }
    };

    if !envelope.result {
        // A bare `{"result": false}` is a well-formed decline with an
        // empty reason, not a malformed response.
        return SessionOutcome::Declined {
            reason: envelope.message.unwrap_or_default(),
        };
    }

    let data = envelope.data.unwrap_or_default();

    if let Some(url) = data.url.filter(|url| !url.is_empty()) {
        return SessionOutcome::Created { redirect_url: url };
    }

    if let Some(id) = data.id.filter(|id| !id.is_empty()) {
        return SessionOutcome::Approved { transaction_id: id };
    }

    SessionOutcome::MalformedResponse {
        raw: response.body.clone(),
    }
}
