//! Structured error results for the RPC surface.
//!
//! Every failure a handler can produce is returned to the client as a JSON
//! body of the shape `{ "error": ..., ...context }`, never as a bare status
//! line or a process fault.

use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use rocket_okapi::util::add_schema_response;
use rocket_okapi::JsonSchema;
use thiserror::Error;

use crate::account::ledger::Currency;

/// Domain failure taxonomy shared by every handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("Not enough {currency}")]
    InsufficientFunds {
        currency: Currency,
        needed: u64,
        have: u64,
    },
    #[error("{0} already claimed")]
    AlreadyClaimed(String),
    #[error("{0} already owned")]
    AlreadyOwned(String),
    #[error("Level {level_id} not unlocked (max={max_unlocked})")]
    NotUnlocked { level_id: u32, max_unlocked: u32 },
    #[error("Season has ended")]
    SeasonEnded,
    #[error("Cooldown active")]
    CooldownActive { remaining_seconds: i64 },
    #[error("{0} not found")]
    NotFound(String),
    #[error("No heroes available")]
    NoHeroesAvailable,
}

/// Wire body for error responses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have: Option<u64>,
}

impl ErrorBody {
    fn new(message: String) -> Self {
        ErrorBody {
            error: message,
            cooldown_remaining: None,
            needed: None,
            have: None,
        }
    }
}

/// Responder wrapping [`EngineError`] with the matching HTTP status.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: rocket::http::Status,
    pub body: ErrorBody,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        use rocket::http::Status;
        let status = match &err {
            EngineError::NotFound(_) => Status::NotFound,
            EngineError::AlreadyClaimed(_) | EngineError::AlreadyOwned(_) => Status::Conflict,
            _ => Status::BadRequest,
        };
        let mut body = ErrorBody::new(err.to_string());
        match err {
            EngineError::CooldownActive { remaining_seconds } => {
                body.cooldown_remaining = Some(remaining_seconds);
            }
            EngineError::InsufficientFunds { needed, have, .. } => {
                body.needed = Some(needed);
                body.have = Some(have);
            }
            _ => {}
        }
        ApiError { status, body }
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        rocket::response::Response::build_from(Json(self.body).respond_to(request)?)
            .status(self.status)
            .ok()
    }
}

impl OpenApiResponderInner for ApiError {
    fn responses(gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();
        let schema = gen.json_schema::<ErrorBody>();
        add_schema_response(&mut responses, 400, "application/json", schema.clone())?;
        add_schema_response(&mut responses, 404, "application/json", schema.clone())?;
        add_schema_response(&mut responses, 409, "application/json", schema)?;
        Ok(responses)
    }
}
