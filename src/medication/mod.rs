pub mod handlers;
pub mod models;

pub use models::extend_by_month;
