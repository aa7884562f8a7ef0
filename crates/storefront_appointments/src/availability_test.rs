// --- File: crates/storefront_appointments/src/availability_test.rs ---
#[cfg(test)]
mod tests {
    use crate::availability::{
        seed_hash, slot_is_available, AvailabilityCalendar, AvailabilityRules,
        DEFAULT_AVAILABILITY_THRESHOLD,
    };
    use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;
    use std::sync::Arc;
    use storefront_config::SchedulingConfig;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn default_calendar(today: NaiveDate) -> AvailabilityCalendar {
        AvailabilityCalendar::build(Arc::new(AvailabilityRules::default()), today)
    }

    // Monday 2 June 2025
    fn monday() -> NaiveDate {
        date(2025, 6, 2)
    }

    #[test]
    fn test_default_calendar_blocks_offsets_and_sundays() {
        let calendar = default_calendar(monday());

        assert_eq!(
            calendar.blocked_dates(),
            vec![date(2025, 6, 5), date(2025, 6, 12), date(2025, 6, 19)]
        );

        let available = calendar.available_dates();
        // 30 days minus 3 blocked Thursdays minus 4 Sundays
        assert_eq!(available.len(), 23);
        assert_eq!(available.first(), Some(&monday()));
        assert_eq!(available.last(), Some(&date(2025, 7, 1)));
        assert!(available.iter().all(|d| d.weekday() != Weekday::Sun));
        assert!(!calendar.is_date_available(date(2025, 6, 5)));
        assert!(!calendar.is_date_available(date(2025, 6, 8)));
        assert!(calendar.is_date_available(date(2025, 6, 10)));
        // Outside the horizon
        assert!(!calendar.is_date_available(date(2025, 7, 2)));
        // In the past
        assert!(!calendar.is_date_available(date(2025, 6, 1)));
    }

    #[test]
    fn test_available_dates_sorted_ascending() {
        let dates = default_calendar(monday()).available_dates();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_explicit_blocked_dates() {
        let config = SchedulingConfig {
            blocked_dates: vec!["2025-06-10".to_string(), "garbage".to_string()],
            ..Default::default()
        };
        let rules = AvailabilityRules::from_config(Some(&config));
        assert_eq!(rules.blocked_dates, vec![date(2025, 6, 10)]);

        let calendar = AvailabilityCalendar::build(Arc::new(rules), monday());
        assert!(!calendar.is_date_available(date(2025, 6, 10)));
        assert!(calendar.blocked_dates().contains(&date(2025, 6, 10)));
    }

    #[test]
    fn test_future_day_has_full_grid() {
        let calendar = default_calendar(monday());
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        let slots = calendar.generate_time_slots(date(2025, 6, 10), now);

        let morning: Vec<&str> = slots.morning.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            morning,
            vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30"]
        );
        assert_eq!(slots.afternoon.len(), 10);
        assert_eq!(slots.afternoon.first().unwrap().id, "13:00");
        assert_eq!(slots.afternoon.last().unwrap().id, "17:30");

        // Madrid is UTC+2 in June
        let first = &slots.morning[0];
        assert_eq!(first.start.to_rfc3339(), "2025-06-10T09:00:00+02:00");
        assert_eq!(first.end.to_rfc3339(), "2025-06-10T09:30:00+02:00");
    }

    #[test]
    fn test_today_excludes_elapsed_slots() {
        let calendar = default_calendar(monday());
        // 11:10 in Madrid
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 9, 10, 0).unwrap();
        let slots = calendar.generate_time_slots(monday(), now);

        let morning: Vec<&str> = slots.morning.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(morning, vec!["11:30", "12:00", "12:30"]);
        assert_eq!(slots.afternoon.len(), 10);
        assert!(slots.iter().all(|s| s.start >= now));
    }

    #[test]
    fn test_today_after_closing_is_empty() {
        let calendar = default_calendar(monday());
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 17, 0, 0).unwrap();
        assert!(calendar.generate_time_slots(monday(), now).is_empty());
    }

    #[test]
    fn test_slot_at_exactly_now_is_kept() {
        let calendar = default_calendar(monday());
        // 10:00 in Madrid
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        let slots = calendar.generate_time_slots(monday(), now);
        assert_eq!(slots.morning.first().unwrap().id, "10:00");
    }

    #[test]
    fn test_slot_availability_follows_seed_hash() {
        let calendar = default_calendar(monday());
        let day = date(2025, 6, 10);
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();

        for slot in calendar.generate_time_slots(day, now).iter() {
            let (h, m) = slot.id.split_once(':').unwrap();
            let expected = slot_is_available(
                day,
                h.parse().unwrap(),
                m.parse().unwrap(),
                DEFAULT_AVAILABILITY_THRESHOLD,
            );
            assert_eq!(slot.available, expected, "slot {}", slot.id);
        }
    }

    #[test]
    fn test_seed_hash_wraps_like_32_bit_arithmetic() {
        assert_eq!(seed_hash(""), 0);
        assert_eq!(seed_hash("a"), 97);
        assert_eq!(seed_hash("ab"), 97 * 31 + 98);
        // Long seeds overflow and wrap instead of panicking
        let h = seed_hash("2025-06-10930");
        let expected = "2025-06-10930"
            .bytes()
            .fold(0i32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as i32));
        assert_eq!(h, expected);
    }

    #[test]
    fn test_slot_seed_uses_unpadded_hour_and_minute() {
        let day = date(2025, 6, 10);
        // 09:00 -> "2025-06-10" + "9" + "0"
        for (hour, minute, seed) in [(9, 0, "2025-06-1090"), (9, 30, "2025-06-10930"), (17, 0, "2025-06-10170")] {
            let x = (seed_hash(seed) as f64).sin() * 10000.0;
            let frac = x - x.floor();
            for threshold in [0.0, 0.3, 0.7] {
                assert_eq!(
                    slot_is_available(day, hour, minute, threshold),
                    frac > threshold,
                    "seed {} threshold {}",
                    seed,
                    threshold
                );
            }
        }
    }

    #[test]
    fn test_threshold_extremes() {
        let day = date(2025, 6, 10);
        // frac is never negative
        assert!((9..18).all(|h| slot_is_available(day, h, 0, -1.0)));
        assert!((9..18).all(|h| !slot_is_available(day, h, 0, 1.0)));
    }

    #[test]
    fn test_rules_from_config_overrides() {
        let config = SchedulingConfig {
            time_zone: Some("America/Mexico_City".to_string()),
            opening_time: Some("10:00".to_string()),
            closing_time: Some("14:00".to_string()),
            afternoon_start: Some("12:00".to_string()),
            slot_minutes: Some(60),
            closed_weekday: Some("Mon".to_string()),
            horizon_days: Some(7),
            blocked_day_offsets: Some(vec![]),
            ..Default::default()
        };
        let rules = Arc::new(AvailabilityRules::from_config(Some(&config)));
        assert_eq!(rules.time_zone, Tz::America__Mexico_City);
        assert_eq!(rules.closed_weekday, Weekday::Mon);

        let calendar = AvailabilityCalendar::build(rules, monday());
        assert_eq!(calendar.available_dates().len(), 6);
        assert!(!calendar.is_date_available(monday()));

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let slots = calendar.generate_time_slots(date(2025, 6, 3), now);
        let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["10:00", "11:00", "12:00", "13:00"]);
        assert_eq!(slots.morning.len(), 2);
    }

    #[test]
    fn test_invalid_config_values_fall_back() {
        let config = SchedulingConfig {
            time_zone: Some("Mars/Olympus".to_string()),
            opening_time: Some("18:00".to_string()),
            closing_time: Some("09:00".to_string()),
            slot_minutes: Some(0),
            closed_weekday: Some("Someday".to_string()),
            availability_threshold: Some(1.5),
            ..Default::default()
        };
        let rules = AvailabilityRules::from_config(Some(&config));
        let defaults = AvailabilityRules::default();
        assert_eq!(rules.time_zone, defaults.time_zone);
        assert_eq!(rules.opening_time, defaults.opening_time);
        assert_eq!(rules.closing_time, defaults.closing_time);
        assert_eq!(rules.slot_duration, defaults.slot_duration);
        assert_eq!(rules.closed_weekday, Weekday::Sun);
        assert_eq!(rules.availability_threshold, DEFAULT_AVAILABILITY_THRESHOLD);
    }

    #[test]
    fn test_today_follows_configured_time_zone() {
        let rules = Arc::new(AvailabilityRules::default());
        // 23:30 UTC on Sunday is already Monday in Madrid
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
        let calendar = AvailabilityCalendar::for_instant(rules, now);
        assert_eq!(calendar.today(), monday());
    }
}
