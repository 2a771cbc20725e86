use clap::Parser;
use dreambook::api::{CatalogClient, CatalogSource, FixtureCatalog, SimulatedBackend};
use dreambook::auth::{is_token_expired, AuthClient, SessionStore};
use dreambook::config::ClientConfig;
use dreambook::models::{Hotel, StayMode};
use dreambook::search::{SearchQuery, SearchViewModel, SortOption, ViewState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Browse DreamBook hotels from the terminal
#[derive(Debug, Parser)]
#[command(name = "dreambook", version)]
struct Args {
    /// Free-text location filter
    #[arg(long, default_value = "")]
    location: String,

    /// Exact location picked from the known locations
    #[arg(long)]
    pick: Option<String>,

    /// price_asc, price_desc, rating_desc, rating_asc, name_asc or name_desc
    #[arg(long, default_value_t = SortOption::default())]
    sort: SortOption,

    /// Show stays for this side of the booking
    #[arg(long, value_parser = parse_mode, default_value = "guest")]
    stays: StayMode,

    /// Write the matching hotels here as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_mode(value: &str) -> Result<StayMode, String> {
    match value {
        "guest" => Ok(StayMode::Guest),
        "landlord" => Ok(StayMode::Landlord),
        other => Err(format!("unknown stay mode: {other}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ClientConfig::from_env()?;

    info!("🏨 DreamBook");
    info!("API: {}  Auth: {}", config.api_base_url, config.auth_base_url);

    let session = SessionStore::from_kind(&config.session_store)?;
    let auth = AuthClient::new(&config, session.clone())?;
    match auth.session().get_access_token() {
        Some(token) if !is_token_expired(&token) => {
            if let Some(user) = auth.session().get_stored_user() {
                info!("Signed in as {} ({})", user.name, user.role);
            }
        }
        Some(_) => info!("Stored session has expired"),
        None => info!("Browsing anonymously"),
    }

    let catalog = CatalogClient::new(&config)?.with_session(session);
    let view_model = SearchViewModel::<Hotel>::new(config.search_delay);
    view_model.load_hotels(&catalog).await;

    // Keep the demo useful without a running API
    if !matches!(view_model.view(), ViewState::Results(_)) {
        info!("No hotels from {}, using sample hotels", catalog.source_name());
        view_model.load_hotels(&FixtureCatalog::default()).await;
    }

    info!("Locations: {}", view_model.locations().join(" | "));

    let query = SearchQuery {
        location_text: args.location.clone(),
        selected_location: args.pick.clone(),
        sort: args.sort,
    };
    view_model.search(&query).await;

    match view_model.view() {
        ViewState::Results(hotels) => {
            info!("✅ {} hotels match, sorted by {}\n", hotels.len(), query.sort);
            for (i, hotel) in hotels.iter().enumerate() {
                println!("{}. {} ({} PLN / noc)", i + 1, hotel.title, hotel.price_per_night);
                println!("   {}", hotel.location);
                if let Some(rating) = hotel.rating {
                    println!("   Rating: {rating:.1}");
                }
                if let Some((lat, lng)) = hotel.coordinates() {
                    println!("   Map: {lat}, {lng}");
                }
                println!();
            }

            if let Some(path) = &args.output {
                let json = serde_json::to_string_pretty(&hotels)?;
                tokio::fs::write(path, json).await?;
                info!("💾 Saved matching hotels to {}", path.display());
            }
        }
        ViewState::NoMatches => info!("No hotels match {:?}", query.location_text),
        ViewState::FetchFailed(reason) => info!("Hotels unavailable: {}", reason),
        ViewState::Loading => {}
    }

    let backend = SimulatedBackend::default().with_latency(config.simulated_latency);
    let stays = backend.fetch_stays(args.stays).await;
    info!("📅 {} stays", stays.len());
    for stay in &stays {
        println!(
            "{} · {} · {} → {} ({} nights, {:?})",
            stay.property_name, stay.location, stay.check_in, stay.check_out, stay.nights, stay.status
        );
    }

    let profile = backend.fetch_user_profile().await;
    info!("👤 {} <{}>", profile.name, profile.email);

    Ok(())
}
