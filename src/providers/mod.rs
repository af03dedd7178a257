pub mod caching;
pub mod er_api;

pub use caching::RateService;
pub use er_api::ErApiProvider;
