use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A bookable listing as returned by the listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Decimal price, encoded as text by the server (e.g. `"150.00"`)
    pub price_per_night: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub owner: i64,
    pub owner_username: String,
}

impl Listing {
    /// Numeric price, if the server's text parses as a decimal
    pub fn price(&self) -> Option<f64> {
        parse_decimal(&self.price_per_night)
    }
}

/// Fields sent when a host creates a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct NewListing {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub price_per_night: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

/// A listing enriched with map coordinates and an image.
///
/// Served from the same endpoint as [`Listing`]; the extra fields default to
/// empty when the server omits them, so a plain listing still decodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_per_night: String,
    pub location: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub owner: i64,
    pub owner_username: String,
}

impl Hotel {
    pub fn price(&self) -> Option<f64> {
        parse_decimal(&self.price_per_night)
    }

    /// Latitude/longitude pair, when both strings parse
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((parse_decimal(&self.latitude)?, parse_decimal(&self.longitude)?))
    }
}

/// A host offering stays
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Host {
    pub id: i64,
    pub name: String,
    pub location: String,
    /// 0–5
    pub rating: f64,
    pub image: String,
}

/// Whether a stay already happened
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StayStatus {
    Completed,
    Upcoming,
}

/// Which side of a booking the stays are listed for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StayMode {
    Landlord,
    Guest,
}

/// A past or upcoming stay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    pub id: String,
    pub property_name: String,
    pub property_type: String,
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_image_url: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub status: StayStatus,
    #[serde(default)]
    pub has_reviewed: bool,
}

/// The sub-ratings a guest gives when reviewing a stay, each 0–5
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRatings {
    pub overall_rating: f64,
    pub cleanliness: f64,
    pub communication: f64,
    pub check_in: f64,
    pub accuracy: f64,
}

/// A submitted review for a stay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub stay_id: String,
    #[serde(flatten)]
    pub ratings: ReviewRatings,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Landlord,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Guest => "guest",
            Role::Landlord => "landlord",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// A user account, as seen by the profile page and the auth API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Number of listed properties, landlords only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<u32>,
}

/// The auth API returns the same record under a different name
pub type User = UserData;

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn apply_to(&self, profile: &mut UserData) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
    }
}

/// An authenticated session as issued by login/register
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Response of the refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshedToken {
    pub access_token: String,
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
