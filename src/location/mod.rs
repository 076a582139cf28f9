pub mod provider;
pub mod resolver;

pub use provider::{GeoPosition, GeolocationOptions, GeolocationProvider, UnsupportedGeolocation};
pub use resolver::{LocationHint, LocationResolver, WeatherBundle};
