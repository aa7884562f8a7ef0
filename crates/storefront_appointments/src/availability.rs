// --- File: crates/storefront_appointments/src/availability.rs ---
//! Date-range generation and pseudo-random slot availability.
//!
//! Availability is computed from configuration and the current instant only.
//! Nothing here consults a backend: blocked dates are offsets from "today",
//! and a slot's availability is a deterministic function of its date and time.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use storefront_config::SchedulingConfig;
use tracing::{debug, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const DEFAULT_TIME_ZONE: Tz = Tz::Europe__Madrid;
pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_HORIZON_DAYS: u32 = 30;
pub const DEFAULT_BLOCKED_DAY_OFFSETS: [u32; 3] = [3, 10, 17];
pub const DEFAULT_AVAILABILITY_THRESHOLD: f64 = 0.3;

/// Source of the current instant. Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// --- Data Structures ---

/// A bookable interval within a business day.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeSlot {
    /// Hour-minute composite, e.g. "09:30".
    #[cfg_attr(feature = "openapi", schema(example = "09:30"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-06-10T09:30:00+02:00"))]
    pub start: DateTime<FixedOffset>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-06-10T10:00:00+02:00"))]
    pub end: DateTime<FixedOffset>,
    pub available: bool,
}

/// Slots of one day, split at the afternoon boundary.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DaySlots {
    pub morning: Vec<TimeSlot>,
    pub afternoon: Vec<TimeSlot>,
}

impl DaySlots {
    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.morning.iter().chain(self.afternoon.iter())
    }

    pub fn find(&self, slot_id: &str) -> Option<&TimeSlot> {
        self.iter().find(|slot| slot.id == slot_id)
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }
}

/// Resolved scheduling rules. Invalid config values fall back to defaults.
#[derive(Debug, Clone)]
pub struct AvailabilityRules {
    pub time_zone: Tz,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub afternoon_start: NaiveTime,
    pub slot_duration: Duration,
    pub closed_weekday: Weekday,
    pub horizon_days: u32,
    pub blocked_day_offsets: Vec<u32>,
    pub blocked_dates: Vec<NaiveDate>,
    pub availability_threshold: f64,
}

impl Default for AvailabilityRules {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            opening_time: hm(9, 0),
            closing_time: hm(18, 0),
            afternoon_start: hm(13, 0),
            slot_duration: Duration::minutes(DEFAULT_SLOT_MINUTES as i64),
            closed_weekday: Weekday::Sun,
            horizon_days: DEFAULT_HORIZON_DAYS,
            blocked_day_offsets: DEFAULT_BLOCKED_DAY_OFFSETS.to_vec(),
            blocked_dates: Vec::new(),
            availability_threshold: DEFAULT_AVAILABILITY_THRESHOLD,
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_time_or(field: &str, value: Option<&String>, fallback: NaiveTime) -> NaiveTime {
    match value {
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M").unwrap_or_else(|_| {
            warn!("Invalid scheduling.{} '{}', using {}", field, raw, fallback.format("%H:%M"));
            fallback
        }),
        None => fallback,
    }
}

impl AvailabilityRules {
    /// Resolves rules from the optional scheduling section.
    pub fn from_config(config: Option<&SchedulingConfig>) -> Self {
        let defaults = Self::default();
        let Some(cfg) = config else {
            return defaults;
        };

        let time_zone = match cfg.time_zone.as_deref() {
            Some(name) => Tz::from_str(name).unwrap_or_else(|_| {
                warn!("Unknown time zone '{}', using {}", name, DEFAULT_TIME_ZONE);
                DEFAULT_TIME_ZONE
            }),
            None => defaults.time_zone,
        };

        let mut opening_time = parse_time_or("opening_time", cfg.opening_time.as_ref(), defaults.opening_time);
        let mut closing_time = parse_time_or("closing_time", cfg.closing_time.as_ref(), defaults.closing_time);
        if closing_time <= opening_time {
            warn!(
                "Closing time {} is not after opening time {}, using default business hours",
                closing_time, opening_time
            );
            opening_time = defaults.opening_time;
            closing_time = defaults.closing_time;
        }
        let afternoon_start = parse_time_or(
            "afternoon_start",
            cfg.afternoon_start.as_ref(),
            defaults.afternoon_start,
        );

        let slot_minutes = match cfg.slot_minutes {
            Some(0) => {
                warn!("scheduling.slot_minutes must be positive, using {}", DEFAULT_SLOT_MINUTES);
                DEFAULT_SLOT_MINUTES
            }
            Some(minutes) => minutes,
            None => DEFAULT_SLOT_MINUTES,
        };

        let closed_weekday = match cfg.closed_weekday.as_deref() {
            Some(day) => Weekday::from_str(day).unwrap_or_else(|_| {
                warn!("Invalid scheduling.closed_weekday '{}', using Sun", day);
                Weekday::Sun
            }),
            None => defaults.closed_weekday,
        };

        let blocked_dates = cfg
            .blocked_dates
            .iter()
            .filter_map(|raw| match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    warn!("Ignoring invalid blocked date '{}'", raw);
                    None
                }
            })
            .collect();

        let availability_threshold = match cfg.availability_threshold {
            Some(t) if (0.0..1.0).contains(&t) => t,
            Some(t) => {
                warn!(
                    "scheduling.availability_threshold {} outside [0, 1), using {}",
                    t, DEFAULT_AVAILABILITY_THRESHOLD
                );
                DEFAULT_AVAILABILITY_THRESHOLD
            }
            None => DEFAULT_AVAILABILITY_THRESHOLD,
        };

        Self {
            time_zone,
            opening_time,
            closing_time,
            afternoon_start,
            slot_duration: Duration::minutes(slot_minutes as i64),
            closed_weekday,
            horizon_days: cfg.horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS),
            blocked_day_offsets: cfg
                .blocked_day_offsets
                .clone()
                .unwrap_or(defaults.blocked_day_offsets),
            blocked_dates,
            availability_threshold,
        }
    }

    /// The calendar date of `now` in the configured time zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.time_zone).date_naive()
    }
}

// --- Availability Logic ---

/// 32-bit wrapping string hash (`h = h * 31 + unit`).
pub fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Deterministic placeholder availability for a slot. Not a capacity model.
pub fn slot_is_available(date: NaiveDate, hour: u32, minute: u32, threshold: f64) -> bool {
    let seed = format!("{}{}{}", date.format("%Y-%m-%d"), hour, minute);
    let x = (seed_hash(&seed) as f64).sin() * 10000.0;
    let frac = x - x.floor();
    frac > threshold
}

/// Bookable dates computed from "today".
#[derive(Debug, Clone)]
pub struct AvailabilityCalendar {
    rules: Arc<AvailabilityRules>,
    today: NaiveDate,
    available: BTreeSet<NaiveDate>,
    blocked: BTreeSet<NaiveDate>,
}

impl AvailabilityCalendar {
    pub fn build(rules: Arc<AvailabilityRules>, today: NaiveDate) -> Self {
        let mut blocked: BTreeSet<NaiveDate> = rules
            .blocked_day_offsets
            .iter()
            .map(|offset| today + Duration::days(*offset as i64))
            .collect();
        blocked.extend(rules.blocked_dates.iter().copied());

        let available = (0..rules.horizon_days as i64)
            .map(|offset| today + Duration::days(offset))
            .filter(|date| !blocked.contains(date) && date.weekday() != rules.closed_weekday)
            .collect::<BTreeSet<_>>();

        debug!(
            "Built availability calendar from {}: {} available, {} blocked",
            today,
            available.len(),
            blocked.len()
        );

        Self {
            rules,
            today,
            available,
            blocked,
        }
    }

    /// Builds the calendar for the day `now` falls on in the configured zone.
    pub fn for_instant(rules: Arc<AvailabilityRules>, now: DateTime<Utc>) -> Self {
        let today = rules.today(now);
        Self::build(rules, today)
    }

    pub fn rules(&self) -> &AvailabilityRules {
        &self.rules
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        self.available.contains(&date)
    }

    /// Available dates, ascending.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.available.iter().copied().collect()
    }

    /// Blocked dates, ascending.
    pub fn blocked_dates(&self) -> Vec<NaiveDate> {
        self.blocked.iter().copied().collect()
    }

    /// Generates the slots of `date`. On the current day, slots starting
    /// before `now` are left out.
    pub fn generate_time_slots(&self, date: NaiveDate, now: DateTime<Utc>) -> DaySlots {
        let rules = &self.rules;
        let tz = rules.time_zone;
        let now_local = now.with_timezone(&tz);
        let is_today = now_local.date_naive() == date;
        let closing = date.and_time(rules.closing_time);

        let mut slots = DaySlots::default();
        let mut cursor = date.and_time(rules.opening_time);

        while cursor + rules.slot_duration <= closing {
            let slot_start = cursor;
            cursor += rules.slot_duration;

            // Local times skipped by a DST jump have no instant.
            let Some(start) = tz.from_local_datetime(&slot_start).earliest() else {
                continue;
            };
            if is_today && start < now_local {
                continue;
            }
            let end = start + rules.slot_duration;

            let time = slot_start.time();
            let (hour, minute) = (time.hour(), time.minute());
            let slot = TimeSlot {
                id: format!("{:02}:{:02}", hour, minute),
                start: start.fixed_offset(),
                end: end.fixed_offset(),
                available: slot_is_available(date, hour, minute, rules.availability_threshold),
            };

            if time < rules.afternoon_start {
                slots.morning.push(slot);
            } else {
                slots.afternoon.push(slot);
            }
        }

        slots
    }
}
