#[cfg(test)]
mod tests {
    use crate::availability::{AvailabilityCalendar, AvailabilityRules};
    use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
    use std::sync::Arc;

    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    use proptest::prelude::*;

    proptest! {
        // Blocked and closed-weekday dates never show up as available
        #[test]
        fn test_available_dates_exclude_blocked_and_closed(
            day_offset in 0..1500i64,
            blocked_offsets in proptest::collection::vec(0..40u32, 0..6),
            closed_index in 0..7usize,
            horizon_days in 1..60u32,
        ) {
            let today = base_date() + Duration::days(day_offset);
            let rules = AvailabilityRules {
                closed_weekday: WEEKDAYS[closed_index],
                horizon_days,
                blocked_day_offsets: blocked_offsets,
                ..Default::default()
            };
            let calendar = AvailabilityCalendar::build(Arc::new(rules), today);
            let blocked = calendar.blocked_dates();

            for date in calendar.available_dates() {
                prop_assert!(!blocked.contains(&date));
                prop_assert!(date.weekday() != WEEKDAYS[closed_index]);
                prop_assert!(date >= today);
                prop_assert!(date < today + Duration::days(horizon_days as i64));
            }
        }

        // No slot generated for the current day starts before now
        #[test]
        fn test_no_slot_before_now(
            day_offset in 0..1500i64,
            minute_of_day in 0i64..(24 * 60),
        ) {
            let rules = Arc::new(AvailabilityRules::default());
            let day = base_date() + Duration::days(day_offset);
            let midnight_utc = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
            let now = midnight_utc + Duration::minutes(minute_of_day);

            let calendar = AvailabilityCalendar::for_instant(rules.clone(), now);
            let today = calendar.today();
            let slots = calendar.generate_time_slots(today, now);

            for slot in slots.iter() {
                prop_assert!(slot.start >= now, "slot {} starts before {}", slot.start, now);
                prop_assert!(slot.end <= slot.start + rules.slot_duration);
            }
        }

        // Morning slots all precede afternoon slots, both within business hours
        #[test]
        fn test_slots_split_at_afternoon_start(day_offset in 1..1500i64) {
            let rules = Arc::new(AvailabilityRules::default());
            let today = base_date();
            let calendar = AvailabilityCalendar::build(rules.clone(), today);
            let now = Utc.from_utc_datetime(&today.and_hms_opt(0, 0, 0).unwrap());
            let slots = calendar.generate_time_slots(today + Duration::days(day_offset), now);

            for slot in &slots.morning {
                prop_assert!(slot.start.time() >= rules.opening_time);
                prop_assert!(slot.start.time() < rules.afternoon_start);
            }
            for slot in &slots.afternoon {
                prop_assert!(slot.start.time() >= rules.afternoon_start);
                prop_assert!(slot.end.time() <= rules.closing_time);
            }
        }
    }
}
