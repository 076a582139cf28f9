pub mod models;
pub mod service;

pub use models::CurrentWeather;
pub use service::WeatherService;
