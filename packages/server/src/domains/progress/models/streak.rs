use chrono::NaiveDate;
use std::collections::HashSet;

/// Consecutive active days ending today. Zero unless today is active.
pub fn calculate_streak(active_days: &[NaiveDate], today: NaiveDate) -> i32 {
    let days: HashSet<NaiveDate> = active_days.iter().copied().collect();

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_activity() {
        assert_eq!(calculate_streak(&[], date(2025, 3, 10)), 0);
    }

    #[test]
    fn test_nothing_today_breaks_streak() {
        let days = [date(2025, 3, 9), date(2025, 3, 8)];
        assert_eq!(calculate_streak(&days, date(2025, 3, 10)), 0);
    }

    #[test]
    fn test_consecutive_days() {
        let days = [date(2025, 3, 10), date(2025, 3, 9), date(2025, 3, 8)];
        assert_eq!(calculate_streak(&days, date(2025, 3, 10)), 3);
    }

    #[test]
    fn test_gap_stops_count() {
        let days = [date(2025, 3, 10), date(2025, 3, 9), date(2025, 3, 7)];
        assert_eq!(calculate_streak(&days, date(2025, 3, 10)), 2);
    }

    #[test]
    fn test_order_and_duplicates_do_not_matter() {
        let days = [
            date(2025, 2, 28),
            date(2025, 3, 1),
            date(2025, 3, 1),
            date(2025, 2, 27),
        ];
        assert_eq!(calculate_streak(&days, date(2025, 3, 1)), 3);
    }
}
