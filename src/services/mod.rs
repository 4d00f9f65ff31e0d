pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod stats_service;
pub mod token;

pub use api_client::ApiClient;
pub use auth_service::authenticate;
pub use http::{GlooHttpClient, HttpClient, HttpResponse};
pub use stats_service::{StatsFetcher, StatsKey};
