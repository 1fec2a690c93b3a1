//! HTTP request handlers.

mod health;
mod invoke;
mod models;
mod version;

pub use health::{livez, readyz};
pub use invoke::{batch, invoke};
pub use models::list_models;
pub use version::version;
