pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
