//! In-memory stand-in for the parts of the backend that are not wired up yet.
//!
//! A [`MockRepository`] is built once per process (or per test) and injected
//! into the simulated backend; nothing here is global.

pub mod fixtures;

use crate::models::{ProfileUpdate, Role, Stay, StayMode, UserData};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug)]
struct Records {
    guest_stays: Vec<Stay>,
    landlord_stays: Vec<Stay>,
    profile: UserData,
    users: Vec<UserData>,
}

/// Mutable sample data behind the simulated endpoints
#[derive(Debug)]
pub struct MockRepository {
    records: Mutex<Records>,
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepository {
    /// Repository seeded with the built-in fixtures
    pub fn new() -> Self {
        Self::with_data(
            fixtures::guest_stays(),
            fixtures::landlord_stays(),
            fixtures::user_profile(),
            fixtures::users(),
        )
    }

    pub fn with_data(
        guest_stays: Vec<Stay>,
        landlord_stays: Vec<Stay>,
        profile: UserData,
        users: Vec<UserData>,
    ) -> Self {
        Self {
            records: Mutex::new(Records {
                guest_stays,
                landlord_stays,
                profile,
                users,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn stays(&self, mode: StayMode) -> Vec<Stay> {
        let records = self.lock();
        match mode {
            StayMode::Guest => records.guest_stays.clone(),
            StayMode::Landlord => records.landlord_stays.clone(),
        }
    }

    /// Mark the guest stay `stay_id` as reviewed with `rating`.
    ///
    /// Returns whether a stay matched; an unknown id changes nothing.
    pub fn record_review(&self, stay_id: &str, rating: f64) -> bool {
        let mut records = self.lock();
        match records.guest_stays.iter_mut().find(|s| s.id == stay_id) {
            Some(stay) => {
                stay.rating = Some(rating);
                stay.has_reviewed = true;
                true
            }
            None => {
                debug!(stay_id, "No stay to attach review to");
                false
            }
        }
    }

    pub fn profile(&self) -> UserData {
        self.lock().profile.clone()
    }

    /// Merge `update` onto the stored profile and return the result
    pub fn update_profile(&self, update: &ProfileUpdate) -> UserData {
        let mut records = self.lock();
        update.apply_to(&mut records.profile);
        let merged = records.profile.clone();
        if let Some(user) = records.users.iter_mut().find(|u| u.id == merged.id) {
            update.apply_to(user);
        }
        merged
    }

    pub fn users(&self) -> Vec<UserData> {
        self.lock().users.clone()
    }

    pub fn set_user_role(&self, user_id: &str, role: Role) -> bool {
        self.modify_user(user_id, |user| user.role = role)
    }

    pub fn set_user_active(&self, user_id: &str, is_active: bool) -> bool {
        self.modify_user(user_id, |user| user.is_active = is_active)
    }

    fn modify_user(&self, user_id: &str, change: impl Fn(&mut UserData)) -> bool {
        let mut records = self.lock();
        let mut found = false;
        if let Some(user) = records.users.iter_mut().find(|u| u.id == user_id) {
            change(user);
            found = true;
        }
        if records.profile.id == user_id {
            change(&mut records.profile);
            found = true;
        }
        found
    }
}
