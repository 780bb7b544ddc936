pub mod game_events;
pub mod game_state;
pub mod hints;
pub mod random;
pub mod runner;
pub mod scoring;
pub mod timer;
pub mod word_bank;

// Re-export main components
pub use game_events::*;
pub use game_state::*;
pub use hints::*;
pub use random::*;
pub use runner::*;
pub use scoring::*;
pub use timer::*;
pub use word_bank::*;
