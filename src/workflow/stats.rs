/// Dashboard counters over the punishment logs
use crate::models::{LogEntry, PunishmentType};
use chrono::Datelike;
use std::fmt;

/// Weekday labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sab"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStats {
    pub total: usize,
    /// BAN and IP_BAN together
    pub bans: usize,
    pub prisons: usize,
    pub mutes: usize,
    pub warns: usize,
    pub org_warns: usize,
    /// Logs per weekday of their UTC timestamp, indexed like [`WEEKDAY_LABELS`]
    pub by_weekday: [usize; 7],
}

impl LogStats {
    pub fn from_logs(logs: &[LogEntry]) -> Self {
        let mut stats = Self {
            total: logs.len(),
            ..Default::default()
        };

        for log in logs {
            let kind = log.punishment_type;
            if kind.is_ban() {
                stats.bans += 1;
            }
            match kind {
                PunishmentType::Prison => stats.prisons += 1,
                PunishmentType::Mute => stats.mutes += 1,
                PunishmentType::Warn => stats.warns += 1,
                PunishmentType::OrgWarn => stats.org_warns += 1,
                PunishmentType::Ban | PunishmentType::IpBan => {}
            }

            let day = log.timestamp.weekday().num_days_from_sunday() as usize;
            stats.by_weekday[day] += 1;
        }

        stats
    }

    /// Weekday label paired with its count
    pub fn weekly(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        WEEKDAY_LABELS.iter().copied().zip(self.by_weekday.iter().copied())
    }
}

impl fmt::Display for LogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total, {} bans, {} prisons, {} mutes, {} warns, {} org warns",
            self.total, self.bans, self.prisons, self.mutes, self.warns, self.org_warns
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use chrono::{TimeZone, Utc};

    fn log_at(kind: PunishmentType, day: u32) -> LogEntry {
        let mut log = seed::logs(Utc::now()).remove(0);
        log.punishment_type = kind;
        // 2026-01-04 is a Sunday
        log.timestamp = Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap();
        log
    }

    #[test]
    fn test_counts_and_weekdays() {
        let logs = vec![
            log_at(PunishmentType::Ban, 4),
            log_at(PunishmentType::IpBan, 5),
            log_at(PunishmentType::Mute, 5),
            log_at(PunishmentType::OrgWarn, 10),
        ];

        let stats = LogStats::from_logs(&logs);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.bans, 2);
        assert_eq!(stats.mutes, 1);
        assert_eq!(stats.org_warns, 1);
        assert_eq!(stats.warns, 0);
        assert_eq!(stats.by_weekday, [1, 2, 0, 0, 0, 0, 1]);

        let weekly: Vec<_> = stats.weekly().collect();
        assert_eq!(weekly[1], ("Seg", 2));
    }

    #[test]
    fn test_empty_logs() {
        let stats = LogStats::from_logs(&[]);
        assert_eq!(stats, LogStats::default());
        assert_eq!(stats.to_string(), "0 total, 0 bans, 0 prisons, 0 mutes, 0 warns, 0 org warns");
    }
}
