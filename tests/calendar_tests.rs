mod common;

#[cfg(test)]
pub mod calendar_tests {
    use chrono::{Datelike, NaiveDate};
    use uuid::Uuid;

    use super::common::*;

    use venuedesk::models::*;
    use venuedesk::services::calendar::*;

    fn month(s: &str) -> CalendarMonth {
        s.parse().expect("valid month")
    }

    #[test]
    fn test_grid_cell_count_matches_blanks_and_days_for_every_month() {
        let mut m = month("2024-01");
        let today = date("2024-06-15");

        for _ in 0..36 {
            let grid = build_month_grid(m, &[], None, today);
            let weekday = m.first_day().weekday().num_days_from_sunday() as usize;

            assert_eq!(grid.leading_blanks, weekday, "month {}", m);
            assert_eq!(grid.days.len() as u32, m.days_in_month(), "month {}", m);
            assert_eq!(grid.cell_count(), weekday + m.days_in_month() as usize);

            m = m.next();
        }
    }

    #[test]
    fn test_march_2026_starts_on_sunday() {
        let grid = build_month_grid(month("2026-03"), &[], None, date("2026-03-01"));

        assert_eq!(grid.leading_blanks, 0);
        assert_eq!(grid.days.len(), 31);
        assert!(grid.days[0].is_today);
    }

    #[test]
    fn test_february_leap_year() {
        assert_eq!(month("2024-02").days_in_month(), 29);
        assert_eq!(month("2026-02").days_in_month(), 28);
        assert_eq!(month("2026-02").leading_blanks(), 0);
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        assert_eq!(month("2026-01").prev(), month("2025-12"));
        assert_eq!(month("2025-12").next(), month("2026-01"));
        assert_eq!(month("2026-03").to_string(), "2026-03");
        assert_eq!(month("2026-03").title(), "Março 2026");
    }

    #[test]
    fn test_month_parse_rejects_garbage() {
        assert!("2026-13".parse::<CalendarMonth>().is_err());
        assert!("março".parse::<CalendarMonth>().is_err());
        assert!("".parse::<CalendarMonth>().is_err());
        assert_eq!(
            CalendarMonth::containing(date("2026-10-16")),
            month("2026-10")
        );
    }

    #[test]
    fn test_space_filter_keeps_only_that_space() {
        let hall = Uuid::new_v4();
        let court = Uuid::new_v4();
        let bookings = vec![
            booking(hall, "2026-03-10", BookingStatus::Confirmed),
            booking(court, "2026-03-10", BookingStatus::Pending),
            booking(hall, "2026-03-10", BookingStatus::Pending),
            booking(court, "2026-03-11", BookingStatus::Pending),
        ];

        let grid = build_month_grid(month("2026-03"), &bookings, Some(hall), date("2026-03-01"));

        for cell in &grid.days {
            assert!(cell.bookings.iter().all(|b| b.space_id == hall));
        }
        let tenth = grid.day(date("2026-03-10")).expect("day in month");
        assert_eq!(tenth.bookings.len(), 2);
        assert!(grid.day(date("2026-03-11")).expect("day").is_empty());

        let unfiltered = build_month_grid(month("2026-03"), &bookings, None, date("2026-03-01"));
        assert_eq!(unfiltered.day(date("2026-03-10")).expect("day").bookings.len(), 3);
    }

    #[test]
    fn test_bookings_outside_month_are_ignored() {
        let space = Uuid::new_v4();
        let bookings = vec![
            booking(space, "2026-02-28", BookingStatus::Confirmed),
            booking(space, "2026-04-01", BookingStatus::Confirmed),
        ];

        let grid = build_month_grid(month("2026-03"), &bookings, None, date("2026-03-01"));
        assert!(grid.days.iter().all(DayCell::is_empty));
    }

    #[test]
    fn test_day_cell_overflow_and_action() {
        let space = Uuid::new_v4();
        let bookings: Vec<Booking> = (0..5)
            .map(|_| booking(space, "2026-03-20", BookingStatus::Pending))
            .collect();

        let grid = build_month_grid(month("2026-03"), &bookings, None, date("2026-03-01"));
        let busy = grid.day(date("2026-03-20")).expect("day");

        assert_eq!(busy.visible().len(), MAX_VISIBLE_BOOKINGS);
        assert_eq!(busy.overflow(), 2);
        assert_eq!(
            busy.action(),
            DayAction::Details {
                date: date("2026-03-20")
            }
        );

        let free = grid.day(date("2026-03-21")).expect("day");
        assert_eq!(free.overflow(), 0);
        assert_eq!(
            free.action(),
            DayAction::Create {
                date: date("2026-03-21")
            }
        );
    }

    #[test]
    fn test_past_days_are_not_selectable() {
        let grid = build_month_grid(month("2026-10"), &[], None, date("2026-10-16"));

        let yesterday = grid.day(date("2026-10-15")).expect("day");
        let today = grid.day(date("2026-10-16")).expect("day");

        assert!(!yesterday.is_selectable());
        assert!(today.is_selectable());
        assert!(today.is_today);
        assert_eq!(today.iso(), "2026-10-16");
    }

    #[test]
    fn test_occupancy_rate() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let march = month("2026-03");

        assert_eq!(occupancy_rate(march, &[], 0), 0);
        assert_eq!(occupancy_rate(march, &[], 2), 0);

        // 31 slots per space; one space fully booked out of two = 50%.
        let full: Vec<Booking> = march
            .days()
            .map(|d| booking(a, &d.format("%Y-%m-%d").to_string(), BookingStatus::Confirmed))
            .collect();
        assert_eq!(occupancy_rate(march, &full, 2), 50);
        assert_eq!(occupancy_rate(march, &full, 1), 100);

        let noise = vec![
            booking(b, "2026-03-05", BookingStatus::Cancelled),
            booking(b, "2026-04-05", BookingStatus::Confirmed),
        ];
        assert_eq!(occupancy_rate(march, &noise, 1), 0);
    }

    #[test]
    fn test_occupancy_counts_a_slot_once() {
        let a = Uuid::new_v4();
        let june = month("2026-06");
        let double = vec![
            booking(a, "2026-06-10", BookingStatus::Confirmed),
            booking(a, "2026-06-10", BookingStatus::Pending),
        ];

        // 1 of 30 slots = 3.33% → 3
        assert_eq!(occupancy_rate(june, &double, 1), 3);
        assert_eq!(bookings_in_month(june, &double), 2);
    }

    #[test]
    fn test_days_iterates_the_whole_month() {
        let days: Vec<NaiveDate> = month("2026-02").days().collect();
        assert_eq!(days.first(), Some(&date("2026-02-01")));
        assert_eq!(days.last(), Some(&date("2026-02-28")));
    }
}
