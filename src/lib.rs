/// Sentinel - storage and workflow core of a game-server moderation panel
///
/// Punishment logs, review requests, staff accounts, announcements and the
/// login trail are kept as JSON collections behind a pluggable
/// [`store::StorageBackend`]. Workflow managers in [`workflow`] enforce the
/// staff hierarchy on top of the [`store::RecordStore`].

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;

pub use config::SentinelConfig;
pub use context::AppContext;
pub use error::{SentinelError, SentinelResult};
