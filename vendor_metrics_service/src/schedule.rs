//! A fixed weekly firing time, e.g. every Sunday at 00:00 UTC.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid weekly schedule. {reason}. Expected something like 'sun 00:00'.")]
pub struct ScheduleParseError {
    input: String,
    reason: String,
}

impl ScheduleParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self { input: input.to_string(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule {
    weekday: Weekday,
    time: NaiveTime,
}

impl Default for WeeklySchedule {
    /// Sunday, 00:00 UTC
    fn default() -> Self {
        Self { weekday: Weekday::Sun, time: NaiveTime::MIN }
    }
}

impl WeeklySchedule {
    pub fn new(weekday: Weekday, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { weekday, time })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// The first firing strictly after `now`. Called at a firing instant, it returns the firing a week later.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.weekday().num_days_from_monday() as i64;
        let target = self.weekday.num_days_from_monday() as i64;
        let days_ahead = (target - today).rem_euclid(7);
        let date = now.date_naive() + Duration::days(days_ahead);
        let candidate = Utc.from_utc_datetime(&date.and_time(self.time));
        if candidate <= now {
            candidate + Duration::weeks(1)
        } else {
            candidate
        }
    }
}

impl FromStr for WeeklySchedule {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(day), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScheduleParseError::new(s, "A weekday and a time are required"));
        };
        let weekday = day.parse::<Weekday>().map_err(|_| ScheduleParseError::new(s, "Unknown weekday"))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|e| ScheduleParseError::new(s, e.to_string()))?;
        Ok(Self { weekday, time })
    }
}

impl Display for WeeklySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let day = format!("{:?}", self.weekday).to_lowercase();
        write!(f, "{day} {:02}:{:02}", self.time.hour(), self.time.minute())
    }
}
