use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::model::{id::RoomId, reservation::ReservationStatus};

/// Number of reservations created in a period, per status.
#[derive(Debug)]
pub struct StatusCount {
    pub status: ReservationStatus,
    pub count: i64,
}

/// A room ranked by how many approved reservations it carries.
#[derive(Debug)]
pub struct RoomUsage {
    pub room_id: RoomId,
    pub name: String,
    pub approved_count: i64,
}

/// `[first of the month, first of the next month)` around `now`.
pub fn month_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let (year, month) = (now.year(), now.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of = |y: i32, m: u32| {
        let date = NaiveDate::from_ymd_opt(y, m, 1)
            .expect("the first of a month is always a valid date");
        Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
    };
    (first_of(year, month), first_of(next_year, next_month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_window_spans_one_calendar_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 15, 30, 0).unwrap();
        let (from, until) = month_window(now);
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(until, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_window_rolls_over_december() {
        let now = Utc.with_ymd_and_hms(2026, 12, 25, 0, 0, 0).unwrap();
        let (from, until) = month_window(now);
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(until, Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }
}
