// Session Module - the identity store views read from and mutate

pub mod ids;
pub mod lifecycle;
pub mod store;

pub use ids::IdAllocator;
pub use lifecycle::{SessionEvent, SessionLifecycle, SessionState, SessionTransitionRecord};
pub use store::SessionStore;
