pub mod models;
pub mod service;

pub use models::SearchResult;
pub use service::GeocodingService;
