pub mod models;
pub mod service;

pub use models::ForecastDay;
pub use service::ForecastService;
