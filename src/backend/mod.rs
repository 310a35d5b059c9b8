//! Backend gateway: the coaching server as seen from the client.
//!
//! The conversation controller only talks to the [`BackendGateway`] trait.
//! [`HttpGateway`] is the real implementation over JSON/HTTP; tests swap in
//! stubs.

pub mod http;
pub mod types;

pub use http::HttpGateway;
pub use types::{ChatMode, CoachReply, HealthReport, ProfileAck};

use async_trait::async_trait;

use crate::error::BackendError;
use crate::onboarding::AthleteProfile;

/// Request/response interface to the coaching backend.
///
/// Each call is a single request bounded by a timeout; nothing is retried.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Whether the backend answers at all. Never errors: any failure is
    /// reported as `false`.
    async fn check_health(&self) -> bool;

    /// Store the athlete profile under `user_id`.
    async fn submit_profile(
        &self,
        user_id: &str,
        profile: &AthleteProfile,
    ) -> Result<ProfileAck, BackendError>;

    /// Ask the coach a question.
    async fn send_query(
        &self,
        text: &str,
        user_id: &str,
        mode: ChatMode,
    ) -> Result<CoachReply, BackendError>;

    /// Look up a stored profile. `Ok(None)` when the backend has none.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<AthleteProfile>, BackendError>;
}
