/// Persisted entities of the moderation panel
///
/// Every entity is a plain record. Relationships between them (a log's
/// `admin` naming a staff account, for instance) are stored by value, so
/// renaming or removing an account never rewrites history.

pub mod catalog;
pub mod duration;
pub mod login;
pub mod notice;
pub mod punishment;
pub mod staff;

pub use duration::{DurationUnit, PunishmentDuration, PERMANENT};
pub use login::{LoginAttempt, LoginRecord, LoginStatus};
pub use notice::{NoticeDraft, NotificationCategory, NotificationEntry};
pub use punishment::{
    LogEntry, PunishmentDraft, PunishmentType, RequestEntry, RequestStatus, EDITED_MARKER,
};
pub use staff::{
    Admin, AdminLevel, AdminStatus, EfficiencySummary, LastLogin, NewAdmin, SessionStatus,
    UserAuth,
};
