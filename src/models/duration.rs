use std::fmt;
use std::str::FromStr;

use crate::error::SentinelError;

/// Duration string used for permanent punishments
pub const PERMANENT: &str = "Permanente";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Minutes => "Minutos",
            DurationUnit::Hours => "Horas",
            DurationUnit::Days => "Dias",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minutos" | "minuto" => Some(DurationUnit::Minutes),
            "horas" | "hora" => Some(DurationUnit::Hours),
            "dias" | "dia" => Some(DurationUnit::Days),
            _ => None,
        }
    }
}

/// Parsed form of a punishment's `duration` field:
/// `"<value> <unit>"` or `"Permanente"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunishmentDuration {
    Permanent,
    Timed { value: u32, unit: DurationUnit },
}

impl FromStr for PunishmentDuration {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(PERMANENT) {
            return Ok(PunishmentDuration::Permanent);
        }

        let mut parts = s.split_whitespace();
        let value = parts
            .next()
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| SentinelError::Validation(format!("Invalid duration: {:?}", s)))?;
        let unit = parts
            .next()
            .and_then(DurationUnit::parse)
            .ok_or_else(|| SentinelError::Validation(format!("Invalid duration unit: {:?}", s)))?;

        if parts.next().is_some() {
            return Err(SentinelError::Validation(format!("Invalid duration: {:?}", s)));
        }

        Ok(PunishmentDuration::Timed { value, unit })
    }
}

impl fmt::Display for PunishmentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PunishmentDuration::Permanent => f.write_str(PERMANENT),
            PunishmentDuration::Timed { value, unit } => write!(f, "{} {}", value, unit.as_str()),
        }
    }
}
