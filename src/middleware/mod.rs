pub mod auth;
pub mod params;
pub mod response;

pub use auth::WriteAccess;
pub use params::QueryParams;
pub use response::{ApiResponse, ApiResult};
