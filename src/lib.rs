// AgencyUnison Library - session and identity store for the agency dashboard
// This exposes the core components for the CLI, views and tests

pub mod cli;
pub mod config;
pub mod identity;
pub mod notifications;
pub mod observability;
pub mod session;
pub mod telemetry;
pub mod views;

// Re-export key types for easy access
pub use config::{AgencyUnisonConfig, ObservabilityConfig, SessionConfig};
pub use identity::{
    Agency, AgencyId, AuthProvider, IdentityError, NewUser, ProfilePatch, Role, Roster, User,
    UserId,
};
pub use notifications::{Notification, NotificationVariant, Notifier, RecordingNotifier, TracingNotifier};
pub use observability::{OperationTimer, SessionMetrics, SessionStats};
pub use session::{IdAllocator, SessionEvent, SessionState, SessionStore, SessionTransitionRecord};
pub use telemetry::{create_session_span, generate_correlation_id, init_telemetry};
