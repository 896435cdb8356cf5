//! Services for cart reconciliation.

pub mod reconcile;
pub mod session;
pub mod sync;

pub use reconcile::{SyncOutcome, SyncRequest, reconcile};
pub use session::CustomerSession;
pub use sync::{SyncClient, SyncError};
