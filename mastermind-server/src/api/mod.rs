pub mod error;
pub mod inputs;
pub mod posts;
pub mod weeks;

pub use error::{ApiError, ApiResult};
