//! Dashboard flows: each one funnels a resolver outcome into the store,
//! setting the error message and clearing the loading flag on every exit
//! path. A failed refresh never clears previously displayed weather.

use crate::debounce::Debouncer;
use crate::location::{LocationHint, LocationResolver};
use crate::location::resolver::MIN_SEARCH_LEN;
use crate::store::WeatherStore;

/// Shown when both the device flow and the fallback fetch fail at startup.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load weather data. Please try again later.";

/// Startup load: device geolocation with the one-shot London fallback behind
/// it. Exhausting both surfaces the canonical failure message.
pub async fn load_initial_weather(resolver: &LocationResolver, store: &mut WeatherStore) {
    store.clear_error();
    store.set_loading(true);

    match resolver.startup_fetch().await {
        Ok(bundle) => {
            store.set_current_weather(bundle.current);
            store.set_forecast(bundle.forecast);
        }
        Err(err) => {
            tracing::error!(error = %err, "Startup weather load failed");
            store.set_error(LOAD_FAILURE_MESSAGE);
        }
    }

    store.set_loading(false);
}

/// Load weather for an explicit location choice (a search selection or a
/// retry). No fallback substitution here; the error surfaces as typed.
pub async fn load_for_location(
    resolver: &LocationResolver,
    store: &mut WeatherStore,
    hint: &LocationHint,
) {
    store.clear_error();
    store.set_loading(true);

    match resolver.resolve_and_fetch(hint).await {
        Ok(bundle) => {
            store.set_current_weather(bundle.current);
            store.set_forecast(bundle.forecast);
        }
        Err(err) => {
            tracing::error!(error = %err, "Weather load failed");
            store.set_error(err.to_string());
        }
    }

    store.set_loading(false);
}

/// One keystroke of search input. Queries below the minimum length clear the
/// candidate list immediately and leave the debouncer idle; anything longer
/// re-arms the debouncer with the trimmed text.
pub fn handle_search_input(
    store: &mut WeatherStore,
    debouncer: &mut Debouncer<String>,
    text: &str,
) {
    store.set_search_query(text);

    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_SEARCH_LEN {
        debouncer.cancel_pending();
        store.clear_search_results();
        return;
    }

    debouncer.call(trimmed.to_string());
}

/// Execute a query the debouncer let through and publish the candidates.
/// Search failures degrade to an empty candidate list rather than an error
/// banner; the typed text stays in the box for another attempt.
pub async fn run_search(resolver: &LocationResolver, store: &mut WeatherStore, query: &str) {
    match resolver.search_cities(query).await {
        Ok(results) => store.set_search_results(results),
        Err(err) => {
            tracing::warn!(error = %err, "City search failed");
            store.clear_search_results();
        }
    }
}
