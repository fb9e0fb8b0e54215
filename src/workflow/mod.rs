/// Moderation workflows layered on the record store
///
/// Every operation takes the acting session explicitly and checks its
/// level before touching storage.

pub mod notices;
pub mod permissions;
pub mod punishments;
pub mod session;
pub mod staff;
pub mod stats;

pub use notices::NoticeBoard;
pub use permissions::{
    can_execute_action, can_manage_logs, can_manage_staff, can_publish_notices, can_remove_admin,
    can_review_requests, MANAGEMENT_LEVEL,
};
pub use punishments::{HistoryFilter, LogFilter, PunishmentManager, Submission};
pub use session::{ClientInfo, SessionManager};
pub use staff::{AdminQuery, StaffManager};
pub use stats::{LogStats, WEEKDAY_LABELS};
