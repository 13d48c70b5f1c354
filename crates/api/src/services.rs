//! Wired implementations of the external collaborators.
//!
//! Real deployments put a video-meeting provider and a delivery channel
//! behind these traits; the defaults here log what they would do and hand
//! back deterministic placeholder URLs, which keeps the engine fully
//! exercisable without external accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde_json::Value;
use slotbook_core::services::{MeetingLinks, MeetingProvider, Notifier, NotifyEvent};
use uuid::Uuid;

pub struct LoggingMeetingProvider;

#[async_trait]
impl MeetingProvider for LoggingMeetingProvider {
    async fn provision_meeting(&self, title: &str, start: DateTime<Utc>) -> Result<MeetingLinks> {
        let room = Uuid::new_v4();
        tracing::info!("Provisioning meeting room {} for '{}' at {}", room, title, start);

        Ok(MeetingLinks {
            host_url: format!("https://meet.slotbook.dev/{}/host", room),
            guest_url: format!("https://meet.slotbook.dev/{}", room),
        })
    }
}

pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, recipient: Uuid, event: NotifyEvent, payload: Value) -> Result<()> {
        tracing::info!("Notifying {}: {:?} {}", recipient, event, payload);
        Ok(())
    }
}
