use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;

use mastermind_types::Week;

use super::random::{rand_int, sample};

/// Posting days as offsets from Monday: Tuesday through Saturday
pub const POSTING_DAY_OFFSETS: [i64; 5] = [1, 2, 3, 4, 5];

/// Posting hours, inclusive, in UTC
pub const POSTING_HOURS: (i64, i64) = (16, 21);

pub const POSTING_MINUTES: [i64; 4] = [0, 15, 30, 45];

/// Minute ranges between consecutive thread events: post → comment1 →
/// comment2 → comment3 → author reply
pub const COMMENT_DELAYS: [(i64, i64); 4] = [(45, 90), (60, 120), (90, 180), (45, 120)];

/// Monday of the week containing `date`
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Number and start date of the week after `prior`, or week 1 starting this
/// Monday when nothing has been generated yet
pub fn next_week_slot(prior: Option<&Week>, today: DateTime<Utc>) -> (i32, NaiveDate) {
    match prior {
        Some(week) => (week.week_number + 1, week.week_start + Duration::days(7)),
        None => (1, monday_of(today.date_naive())),
    }
}

/// Scheduled time of the `iteration`th post of a week (zero-based)
pub fn post_time<R: Rng + ?Sized>(
    week_start: NaiveDate,
    iteration: usize,
    rng: &mut R,
) -> DateTime<Utc> {
    let day_offset = POSTING_DAY_OFFSETS[iteration % POSTING_DAY_OFFSETS.len()];
    let hour = rand_int(rng, POSTING_HOURS.0, POSTING_HOURS.1);
    let minute = sample(&POSTING_MINUTES, rng).copied().unwrap_or(0);

    Utc.from_utc_datetime(&week_start.and_time(NaiveTime::default()))
        + Duration::days(day_offset)
        + Duration::hours(hour)
        + Duration::minutes(minute)
}

/// Times of the four thread comments, each strictly after the one before
pub fn comment_times<R: Rng + ?Sized>(posted_at: DateTime<Utc>, rng: &mut R) -> [DateTime<Utc>; 4] {
    let mut at = posted_at;
    COMMENT_DELAYS.map(|(min, max)| {
        at += Duration::minutes(rand_int(&mut *rng, min, max));
        at
    })
}
