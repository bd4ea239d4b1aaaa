// Identity Module - users, agencies and the roster that holds them

pub mod errors;
pub mod roster;
pub mod seed;
pub mod types;

pub use errors::IdentityError;
pub use roster::Roster;
pub use types::{Agency, AgencyId, AuthProvider, NewUser, ProfilePatch, Role, User, UserId};
