pub mod handlers;
pub mod models;
mod routes;

pub use handlers::AppState;
pub use routes::create_router;
