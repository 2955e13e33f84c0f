// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod ink;
pub mod quiz;
pub mod reconciler;
pub mod runtime;
pub mod session;
pub mod speech;
pub mod store;
pub mod summary;
pub mod translation;
pub mod word_list;

pub use error::{CapabilityError, QuizError, StoreError, WordListError};
pub use quiz::{Effect, Event, Transition};
pub use session::{GameStats, Phase, SessionState, WordResult};
