pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::{create_app, AppState, BASE_PATH};
