pub mod extractor;
pub mod models;
pub mod security;
pub mod session;

pub use extractor::AuthenticatedUser;
pub use security::auth_middleware;
