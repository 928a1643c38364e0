pub mod catalogue;
pub mod list_state;
pub mod locks;
pub mod membership;
pub mod reconciler;
pub mod status;

pub use catalogue::CatalogueService;
pub use list_state::ListState;
pub use locks::MutationLocks;
pub use membership::{Gesture, ListCommand, Membership, Transition};
pub use reconciler::ListStateReconciler;
pub use status::{OperationStatus, StatusTracker};
