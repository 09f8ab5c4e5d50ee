// Service exports
pub mod assignments;
pub mod cache;
pub mod matching;
pub mod memory;
pub mod postgres;
pub mod store;

pub use assignments::{AssignmentError, AssignmentRecorder, DuplicatePolicy};
pub use cache::CachedStore;
pub use matching::{MatchingError, MatchingService, VolunteerMatches};
pub use memory::InMemoryStore;
pub use postgres::{PostgresClient, PostgresError};
pub use store::{AssignmentStore, EventStore, NotificationStore, Store, StoreError, VolunteerStore};
