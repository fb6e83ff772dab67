pub mod api_trait;
pub mod http_api;

pub use api_trait::BookkeepingApi;
pub use http_api::HttpBookkeepingApi;
