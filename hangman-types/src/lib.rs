pub mod game;
pub mod messages;
pub mod errors;

pub type SessionId = uuid::Uuid;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use errors::*;
