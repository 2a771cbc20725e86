use crate::api::faults::{FaultPolicy, RandomFaults};
use crate::error::{ApiError, Result};
use crate::mock::MockRepository;
use crate::models::{ProfileUpdate, ReviewRatings, Role, Stay, StayMode, UserData};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Chance that the stays endpoint pretends to be offline
pub const STAYS_OFFLINE_RATE: f64 = 0.25;
/// Chance that a review submission fails.
///
/// One in ten, the rate the web front end simulates.
pub const REVIEW_FAILURE_RATE: f64 = 0.1;
/// Chance that the profile endpoint pretends to be offline
pub const PROFILE_OFFLINE_RATE: f64 = 0.25;

const STAYS_LATENCY: Duration = Duration::from_millis(1000);
const REVIEW_LATENCY: Duration = Duration::from_millis(1500);
const PROFILE_LATENCY: Duration = Duration::from_millis(800);
const PROFILE_UPDATE_LATENCY: Duration = Duration::from_millis(1000);
const USERS_LATENCY: Duration = Duration::from_millis(1000);
const ADMIN_UPDATE_LATENCY: Duration = Duration::from_millis(500);

/// Endpoints that have no real backend yet: stays, reviews, profile and
/// the admin user list. Each call waits a realistic latency, may fail by
/// the injected [`FaultPolicy`], and is served from a [`MockRepository`].
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    repo: Arc<MockRepository>,
    faults: Arc<dyn FaultPolicy>,
    latency: bool,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Arc::new(MockRepository::new()), Arc::new(RandomFaults))
    }
}

impl SimulatedBackend {
    pub fn new(repo: Arc<MockRepository>, faults: Arc<dyn FaultPolicy>) -> Self {
        Self {
            repo,
            faults,
            latency: true,
        }
    }

    /// Turn the artificial per-call delay on or off
    pub fn with_latency(mut self, enabled: bool) -> Self {
        self.latency = enabled;
        self
    }

    pub fn repository(&self) -> &MockRepository {
        &self.repo
    }

    async fn pause(&self, delay: Duration) {
        if self.latency {
            tokio::time::sleep(delay).await;
        }
    }

    async fn round_trip(&self, delay: Duration, failure_rate: f64) -> Result<()> {
        self.pause(delay).await;
        if self.faults.should_fail(failure_rate) {
            return Err(ApiError::SimulatedOffline);
        }
        Ok(())
    }

    /// Stays for `mode`. Never fails: when the backend is down the sample
    /// stays are shown instead.
    pub async fn fetch_stays(&self, mode: StayMode) -> Vec<Stay> {
        if let Err(e) = self.round_trip(STAYS_LATENCY, STAYS_OFFLINE_RATE).await {
            info!(error = %e, "API is offline, using mock data");
        }
        self.repo.stays(mode)
    }

    /// Submit a review and mark the stay as reviewed.
    ///
    /// An unknown `stay_id` is accepted and changes nothing.
    pub async fn submit_review(
        &self,
        stay_id: &str,
        ratings: ReviewRatings,
        comment: &str,
    ) -> Result<()> {
        if let Err(e) = self.round_trip(REVIEW_LATENCY, REVIEW_FAILURE_RATE).await {
            error!(stay_id, error = %e, "Error submitting review");
            return Err(e);
        }

        info!(
            stay_id,
            overall = ratings.overall_rating,
            cleanliness = ratings.cleanliness,
            communication = ratings.communication,
            check_in = ratings.check_in,
            accuracy = ratings.accuracy,
            comment_len = comment.len(),
            "Review submitted"
        );
        self.repo.record_review(stay_id, ratings.overall_rating);
        Ok(())
    }

    /// The signed-in user's profile. Never fails: falls back to the sample
    /// profile when the backend is down.
    pub async fn fetch_user_profile(&self) -> UserData {
        if let Err(e) = self.round_trip(PROFILE_LATENCY, PROFILE_OFFLINE_RATE).await {
            info!(error = %e, "API is offline, using mock profile");
        }
        self.repo.profile()
    }

    /// Merge `update` onto the profile; fields it leaves out are kept
    pub async fn update_user_profile(&self, user_id: &str, update: &ProfileUpdate) -> UserData {
        self.pause(PROFILE_UPDATE_LATENCY).await;
        let current = self.repo.profile();
        if current.id != user_id {
            warn!(user_id, profile = %current.id, "Profile update for a different user id");
        }
        let merged = self.repo.update_profile(update);
        debug!(user_id, "Profile updated");
        merged
    }

    pub async fn fetch_users(&self) -> Vec<UserData> {
        self.pause(USERS_LATENCY).await;
        self.repo.users()
    }

    /// Change a user's role; an unknown id changes nothing
    pub async fn update_user_role(&self, user_id: &str, role: Role) {
        self.pause(ADMIN_UPDATE_LATENCY).await;
        if self.repo.set_user_role(user_id, role) {
            info!(user_id, %role, "User role updated");
        } else {
            debug!(user_id, "No user to update role for");
        }
    }

    /// Activate or deactivate a user; an unknown id changes nothing
    pub async fn update_user_status(&self, user_id: &str, is_active: bool) {
        self.pause(ADMIN_UPDATE_LATENCY).await;
        if self.repo.set_user_active(user_id, is_active) {
            info!(user_id, is_active, "User status updated");
        } else {
            debug!(user_id, "No user to update status for");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::faults::{AlwaysFail, NeverFail};
    use crate::mock::fixtures;

    fn backend(faults: Arc<dyn FaultPolicy>) -> SimulatedBackend {
        SimulatedBackend::new(Arc::new(MockRepository::new()), faults).with_latency(false)
    }

    fn ratings(overall: f64) -> ReviewRatings {
        ReviewRatings {
            overall_rating: overall,
            cleanliness: 5.0,
            communication: 4.0,
            check_in: 4.0,
            accuracy: 5.0,
        }
    }

    #[tokio::test]
    async fn stays_fall_back_to_mode_fixtures_when_offline() {
        let backend = backend(Arc::new(AlwaysFail));
        assert_eq!(backend.fetch_stays(StayMode::Guest).await, fixtures::guest_stays());
        assert_eq!(
            backend.fetch_stays(StayMode::Landlord).await,
            fixtures::landlord_stays()
        );
    }

    #[tokio::test]
    async fn review_updates_matching_stay_only() {
        let backend = backend(Arc::new(NeverFail));
        let before = backend.fetch_stays(StayMode::Guest).await;

        backend.submit_review("g2", ratings(4.5), "Great view").await.unwrap();

        let after = backend.fetch_stays(StayMode::Guest).await;
        let reviewed = after.iter().find(|s| s.id == "g2").unwrap();
        assert!(reviewed.has_reviewed);
        assert_eq!(reviewed.rating, Some(4.5));
        for stay in after.iter().filter(|s| s.id != "g2") {
            assert!(before.contains(stay));
        }
    }

    #[tokio::test]
    async fn review_of_unknown_stay_is_a_no_op() {
        let backend = backend(Arc::new(NeverFail));
        let before = backend.fetch_stays(StayMode::Guest).await;
        backend
            .submit_review("does-not-exist", ratings(3.0), "")
            .await
            .unwrap();
        assert_eq!(backend.fetch_stays(StayMode::Guest).await, before);
    }

    #[tokio::test]
    async fn failed_review_is_reported_and_changes_nothing() {
        let backend = backend(Arc::new(AlwaysFail));
        let before = backend.fetch_stays(StayMode::Guest).await;
        let err = backend.submit_review("g2", ratings(4.0), "").await.unwrap_err();
        assert!(matches!(err, ApiError::SimulatedOffline));
        assert_eq!(backend.fetch_stays(StayMode::Guest).await, before);
    }

    #[tokio::test]
    async fn profile_falls_back_when_offline() {
        let backend = backend(Arc::new(AlwaysFail));
        assert_eq!(backend.fetch_user_profile().await, fixtures::user_profile());
    }

    #[tokio::test]
    async fn profile_update_keeps_unspecified_fields() {
        let backend = backend(Arc::new(AlwaysFail));
        let before = backend.fetch_user_profile().await;

        let update = ProfileUpdate {
            name: Some("New Name".to_string()),
            email: None,
        };
        let updated = backend.update_user_profile(&before.id, &update).await;

        assert_eq!(updated.name, "New Name");
        assert_eq!(
            UserData {
                name: before.name.clone(),
                ..updated.clone()
            },
            before
        );
        assert_eq!(backend.fetch_user_profile().await, updated);
    }

    #[tokio::test]
    async fn admin_updates_apply_by_id() {
        let backend = backend(Arc::new(AlwaysFail));
        backend.update_user_role("user-2", Role::Landlord).await;
        backend.update_user_status("user-2", false).await;
        backend.update_user_status("nobody", false).await;

        let users = backend.fetch_users().await;
        let user = users.iter().find(|u| u.id == "user-2").unwrap();
        assert_eq!(user.role, Role::Landlord);
        assert!(!user.is_active);
        assert_eq!(users.len(), fixtures::users().len());
        assert_eq!(backend.repository().users(), users);
    }

    #[tokio::test]
    async fn backends_sharing_a_repository_see_each_others_writes() {
        let repo = Arc::new(MockRepository::new());
        let writer =
            SimulatedBackend::new(Arc::clone(&repo), Arc::new(NeverFail)).with_latency(false);
        let reader = SimulatedBackend::new(repo, Arc::new(AlwaysFail)).with_latency(false);

        writer.submit_review("g2", ratings(5.0), "").await.unwrap();

        assert!(reader
            .repository()
            .stays(StayMode::Guest)
            .iter()
            .any(|s| s.id == "g2" && s.has_reviewed));
        assert_eq!(
            reader.fetch_stays(StayMode::Guest).await,
            writer.repository().stays(StayMode::Guest)
        );
    }
}
