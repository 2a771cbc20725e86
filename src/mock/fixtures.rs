use crate::models::{Host, Hotel, Role, Stay, StayStatus, UserData};
use chrono::{NaiveDate, TimeZone, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn joined(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Stays of the demo guest account
pub fn guest_stays() -> Vec<Stay> {
    vec![
        Stay {
            id: "g1".to_string(),
            property_name: "Przytulny apartament w centrum".to_string(),
            property_type: "Apartment".to_string(),
            location: "Warszawa, Polska".to_string(),
            check_in: date(2025, 3, 10),
            check_out: date(2025, 3, 14),
            nights: 4,
            guest_name: None,
            host_name: Some("Jan Kowalski".to_string()),
            guest_image_url: None,
            host_image_url: Some("https://images.unsplash.com/photo-1582719508461-905c673771fd".to_string()),
            image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945".to_string(),
            rating: Some(4.8),
            status: StayStatus::Completed,
            has_reviewed: true,
        },
        Stay {
            id: "g2".to_string(),
            property_name: "Domek nad morzem".to_string(),
            property_type: "House".to_string(),
            location: "Gdańsk, Polska".to_string(),
            check_in: date(2025, 7, 2),
            check_out: date(2025, 7, 9),
            nights: 7,
            guest_name: None,
            host_name: Some("Piotr Wiśniewski".to_string()),
            guest_image_url: None,
            host_image_url: None,
            image_url: "https://images.unsplash.com/photo-1582719508461-905c673771fd".to_string(),
            rating: None,
            status: StayStatus::Completed,
            has_reviewed: false,
        },
        Stay {
            id: "g3".to_string(),
            property_name: "Mountain Lodge".to_string(),
            property_type: "Lodge".to_string(),
            location: "Zakopane, Polska".to_string(),
            check_in: date(2027, 1, 20),
            check_out: date(2027, 1, 23),
            nights: 3,
            guest_name: None,
            host_name: Some("Anna Nowak".to_string()),
            guest_image_url: None,
            host_image_url: None,
            image_url: "https://images.unsplash.com/photo-1568084680786-a84f91d1153c".to_string(),
            rating: None,
            status: StayStatus::Upcoming,
            has_reviewed: false,
        },
    ]
}

/// Stays hosted by the demo landlord account
pub fn landlord_stays() -> Vec<Stay> {
    vec![
        Stay {
            id: "l1".to_string(),
            property_name: "City View Hotel".to_string(),
            property_type: "Hotel".to_string(),
            location: "Kraków, Polska".to_string(),
            check_in: date(2025, 5, 1),
            check_out: date(2025, 5, 3),
            nights: 2,
            guest_name: Some("Marta Zielińska".to_string()),
            host_name: None,
            guest_image_url: Some("https://images.unsplash.com/photo-1494790108377-be9c29b29330".to_string()),
            host_image_url: None,
            image_url: "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb".to_string(),
            rating: Some(4.6),
            status: StayStatus::Completed,
            has_reviewed: true,
        },
        Stay {
            id: "l2".to_string(),
            property_name: "City View Hotel".to_string(),
            property_type: "Hotel".to_string(),
            location: "Kraków, Polska".to_string(),
            check_in: date(2027, 2, 14),
            check_out: date(2027, 2, 16),
            nights: 2,
            guest_name: Some("Tomasz Lewandowski".to_string()),
            host_name: None,
            guest_image_url: None,
            host_image_url: None,
            image_url: "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb".to_string(),
            rating: None,
            status: StayStatus::Upcoming,
            has_reviewed: false,
        },
    ]
}

/// The profile shown when the profile endpoint is unreachable
pub fn user_profile() -> UserData {
    UserData {
        id: "user-1".to_string(),
        name: "Jan Kowalski".to_string(),
        email: "jan.kowalski@example.com".to_string(),
        role: Role::Landlord,
        is_active: true,
        joined_at: joined(2023, 6, 12),
        avatar_url: Some("https://images.unsplash.com/photo-1500648767791-00dcc994a43e".to_string()),
        properties: Some(3),
        bookings: Some(12),
    }
}

/// Accounts listed on the admin screen
pub fn users() -> Vec<UserData> {
    vec![
        user_profile(),
        UserData {
            id: "user-2".to_string(),
            name: "Anna Nowak".to_string(),
            email: "anna.nowak@example.com".to_string(),
            role: Role::Guest,
            is_active: true,
            joined_at: joined(2024, 2, 3),
            avatar_url: None,
            properties: None,
            bookings: Some(5),
        },
        UserData {
            id: "user-3".to_string(),
            name: "Piotr Wiśniewski".to_string(),
            email: "piotr.w@example.com".to_string(),
            role: Role::Admin,
            is_active: true,
            joined_at: joined(2022, 11, 20),
            avatar_url: None,
            properties: None,
            bookings: Some(0),
        },
        UserData {
            id: "user-4".to_string(),
            name: "Katarzyna Wójcik".to_string(),
            email: "k.wojcik@example.com".to_string(),
            role: Role::Guest,
            is_active: false,
            joined_at: joined(2024, 8, 17),
            avatar_url: None,
            properties: None,
            bookings: Some(1),
        },
    ]
}

/// Hosts shown on the host discovery page
pub fn hosts() -> Vec<Host> {
    vec![
        Host {
            id: 1,
            name: "Jan Kowalski".to_string(),
            location: "Warszawa, Polska".to_string(),
            rating: 4.8,
            image: "https://images.unsplash.com/photo-1582719508461-905c673771fd".to_string(),
        },
        Host {
            id: 2,
            name: "Anna Nowak".to_string(),
            location: "Kraków, Polska".to_string(),
            rating: 4.6,
            image: "https://images.unsplash.com/photo-1568084680786-a84f91d1153c".to_string(),
        },
        Host {
            id: 3,
            name: "Piotr Wiśniewski".to_string(),
            location: "Gdańsk, Polska".to_string(),
            rating: 4.9,
            image: "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb".to_string(),
        },
    ]
}

/// Hotels shown when the listings API has nothing to offer
pub fn hotels() -> Vec<Hotel> {
    [
        SampleHotel {
            id: 1,
            title: "Grand Hotel Warszawa",
            location: "Warszawa, Polska",
            price: "150.00",
            rating: 4.8,
            coordinates: ("52.2297", "21.0122"),
            image: "https://images.unsplash.com/photo-1566073771259-6a8506099945",
        },
        SampleHotel {
            id: 2,
            title: "Seaside Resort",
            location: "Gdańsk, Polska",
            price: "120.00",
            rating: 4.5,
            coordinates: ("54.3520", "18.6466"),
            image: "https://images.unsplash.com/photo-1582719508461-905c673771fd",
        },
        SampleHotel {
            id: 3,
            title: "Mountain Lodge",
            location: "Zakopane, Polska",
            price: "180.00",
            rating: 4.9,
            coordinates: ("49.2992", "19.9496"),
            image: "https://images.unsplash.com/photo-1568084680786-a84f91d1153c",
        },
        SampleHotel {
            id: 4,
            title: "City View Hotel",
            location: "Kraków, Polska",
            price: "140.00",
            rating: 4.6,
            coordinates: ("50.0647", "19.9450"),
            image: "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb",
        },
    ]
    .into_iter()
    .map(sample_hotel)
    .collect()
}

struct SampleHotel {
    id: i64,
    title: &'static str,
    location: &'static str,
    price: &'static str,
    rating: f64,
    coordinates: (&'static str, &'static str),
    image: &'static str,
}

fn sample_hotel(sample: SampleHotel) -> Hotel {
    let (latitude, longitude) = sample.coordinates;
    Hotel {
        id: sample.id,
        title: sample.title.to_string(),
        description: format!("{} w miejscowości {}", sample.title, sample.location),
        price_per_night: sample.price.to_string(),
        location: sample.location.to_string(),
        latitude: latitude.to_string(),
        longitude: longitude.to_string(),
        image_url: sample.image.to_string(),
        rating: Some(sample.rating),
        created_at: joined(2024, 1, 1),
        owner: 1,
        owner_username: "dreambook".to_string(),
    }
}
