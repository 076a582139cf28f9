mod app;
mod conditions;
mod config;
mod debounce;
mod error;
mod forecast;
mod geocoding;
mod location;
mod store;
mod weather;

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::forecast::ForecastService;
use crate::geocoding::GeocodingService;
use crate::location::{
    GeoPosition, LocationHint, LocationResolver, UnsupportedGeolocation,
};
use crate::store::WeatherStore;
use crate::weather::WeatherService;

/// Shared HTTP client; one pool for the weather, forecast, and geocoding
/// requests.
fn create_http_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    let client = create_http_client(config.request_timeout_secs)?;

    let resolver = LocationResolver::new(
        // No position source on a terminal host; the startup flow degrades
        // to the fallback coordinate
        Arc::new(UnsupportedGeolocation),
        WeatherService::new(client.clone(), &config.weather_base_url),
        ForecastService::new(client.clone(), &config.weather_base_url),
        GeocodingService::new(client, &config.geocoding_base_url),
        GeoPosition {
            latitude: config.fallback_latitude,
            longitude: config.fallback_longitude,
        },
    );

    let mut store = WeatherStore::new(config.units, config.theme);

    match std::env::args().nth(1) {
        Some(city) => {
            // Feed the typed city through the debounced search path so the
            // candidate list mirrors what the search box would show
            let (tx, mut rx) = mpsc::unbounded_channel();
            let mut debouncer =
                Debouncer::new(Duration::from_millis(config.search_debounce_ms), tx);

            app::handle_search_input(&mut store, &mut debouncer, &city);
            if debouncer.is_pending() {
                if let Some(query) = rx.recv().await {
                    app::run_search(&resolver, &mut store, &query).await;
                }
            }

            if !store.search_results().is_empty() {
                println!("Matches:");
                for candidate in store.search_results() {
                    match &candidate.region {
                        Some(region) => println!(
                            "  {}, {} ({})",
                            candidate.name, region, candidate.country_code
                        ),
                        None => println!("  {} ({})", candidate.name, candidate.country_code),
                    }
                }
                println!();
            }

            app::load_for_location(&resolver, &mut store, &LocationHint::City(city)).await;
        }
        None => app::load_initial_weather(&resolver, &mut store).await,
    }

    if let Some(message) = store.last_error() {
        eprintln!("{message}");
        std::process::exit(1);
    }

    render(&store);
    Ok(())
}

/// Dump the normalized model through the store's derived-value functions.
fn render(store: &WeatherStore) {
    let Some(weather) = store.current_weather() else {
        return;
    };

    let place = if weather.country_code.is_empty() {
        weather.location_name.clone()
    } else {
        format!("{}, {}", weather.location_name, weather.country_code)
    };

    println!("{place}: {}", weather.description);
    println!(
        "  {}{} (feels like {}{})",
        store.display_temperature(weather.temperature),
        store.temperature_unit_label(),
        store.display_temperature(weather.feels_like),
        store.temperature_unit_label(),
    );
    println!(
        "  humidity {}%, wind {} {}, pressure {} hPa",
        weather.humidity,
        store.display_wind_speed(weather.wind_speed),
        store.wind_speed_unit_label(),
        weather.pressure,
    );

    if store.forecast().is_empty() {
        return;
    }

    println!();
    for day in store.forecast() {
        let label = DateTime::from_timestamp(day.date, 0)
            .map(|dt| dt.format("%a %b %e").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {label}: {}{} / {}{}  {}",
            store.display_temperature(day.temperature_min),
            store.temperature_unit_label(),
            store.display_temperature(day.temperature_max),
            store.temperature_unit_label(),
            day.description,
        );
    }
}
