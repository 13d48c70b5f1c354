//! Contracts for the external collaborators the engine consumes.
//!
//! Both are interfaces only: the meeting provider may fail without rolling
//! back an already-committed booking, and notifier failures are logged by
//! callers, never propagated.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// URLs handed to the two parties of a confirmed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingLinks {
    pub host_url: String,
    pub guest_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyEvent {
    SessionRequested,
    SessionConfirmed,
    SessionCancelled,
}

#[async_trait]
pub trait MeetingProvider: Send + Sync {
    async fn provision_meeting(&self, title: &str, start: DateTime<Utc>) -> Result<MeetingLinks>;
}

/// Fire-and-forget notification fan-out.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: Uuid, event: NotifyEvent, payload: Value) -> Result<()>;
}
