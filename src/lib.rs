pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session;
pub mod views;

pub use error::BuddyError;
pub use router::{AppState, budget_router};
pub use session::{MemorySessionStore, Session, SessionStore};
