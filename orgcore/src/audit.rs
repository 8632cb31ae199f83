//! Audit events
//!
//! Records describing an authorization decision or a scoped data
//! access, built by whoever consumes the decisions and handed over to
//! whatever persists them.

use serde::{Deserialize, Serialize};
use crate::agent::Agent;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    Denied,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AuditEvent {
    pub timestamp: i64,
    pub agent: Agent,
    pub action: String,
    pub resource: String,
    pub outcome: Outcome,
    pub detail: Option<serde_json::Value>,
    pub origin: Option<String>,
    pub client: Option<String>,
}

mod impls;
