//! Lifecycle status of scheduled records.
//!
//! A record is `Upcoming` before its start boundary, `Closed` after its end
//! boundary and `Open` otherwise. Boundaries are portal-local wall times built
//! from a date string plus an optional `HH:mm` time; without a time the
//! boundary is midnight at the start of that day, for the end date too.
//!
//! Unparseable input never fails. It yields an incomparable boundary, and
//! since neither `<` nor `>` holds against it the record falls through to
//! `Open`.

mod clock;
mod parse;

use serde::{Deserialize, Serialize};

pub use clock::{Clock, FixedClock, SystemClock};
pub use parse::{parse_boundary, parse_date};

use chrono::NaiveDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormStatus {
    Upcoming,
    Open,
    Closed,
}

/// Anything carrying a start/end date window.
pub trait Schedulable {
    fn start_date(&self) -> &str;
    fn end_date(&self) -> &str;

    fn start_time(&self) -> Option<&str> {
        None
    }

    fn end_time(&self) -> Option<&str> {
        None
    }

    fn status(&self, clock: &dyn Clock) -> FormStatus {
        compute_status(
            clock,
            self.start_date(),
            self.end_date(),
            self.start_time(),
            self.end_time(),
        )
    }
}

pub fn compute_status(
    clock: &dyn Clock,
    start_date: &str,
    end_date: &str,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> FormStatus {
    let start = parse_boundary(start_date, start_time);
    let end = parse_boundary(end_date, end_time);

    status_at(clock.now(), start, end)
}

fn status_at(
    now: NaiveDateTime,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> FormStatus {
    if matches!(start, Some(start) if now < start) {
        FormStatus::Upcoming
    } else if matches!(end, Some(end) if now > end) {
        FormStatus::Closed
    } else {
        FormStatus::Open
    }
}

/// A copy of a record with its derived status attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scheduled<T> {
    #[serde(flatten)]
    pub record: T,
    pub status: FormStatus,
}

/// Derives the status of every record, in input order. The input is only
/// borrowed; each output entry owns a clone.
pub fn compute_statuses<T>(clock: &dyn Clock, records: &[T]) -> Vec<Scheduled<T>>
where
    T: Schedulable + Clone,
{
    records
        .iter()
        .map(|record| Scheduled {
            status: record.status(clock),
            record: record.clone(),
        })
        .collect()
}

/// Records split by status, each bucket keeping the incoming order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusBuckets<T> {
    pub open: Vec<Scheduled<T>>,
    pub upcoming: Vec<Scheduled<T>>,
    pub closed: Vec<Scheduled<T>>,
}

impl<T> StatusBuckets<T> {
    pub fn partition(scheduled: Vec<Scheduled<T>>) -> Self {
        let mut buckets = Self {
            open: vec![],
            upcoming: vec![],
            closed: vec![],
        };

        for entry in scheduled {
            match entry.status {
                FormStatus::Open => buckets.open.push(entry),
                FormStatus::Upcoming => buckets.upcoming.push(entry),
                FormStatus::Closed => buckets.closed.push(entry),
            }
        }

        buckets
    }

    pub fn len(&self) -> usize {
        self.open.len() + self.upcoming.len() + self.closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .unwrap()
    }

    #[test]
    fn incomparable_boundaries_fall_through_to_open() {
        let now = at(2026, 1, 20, 12, 0);

        assert_eq!(status_at(now, None, None), FormStatus::Open);
        assert_eq!(
            status_at(now, None, Some(at(2026, 1, 1, 0, 0))),
            FormStatus::Closed
        );
        assert_eq!(
            status_at(now, Some(at(2026, 2, 1, 0, 0)), None),
            FormStatus::Upcoming
        );
    }

    #[test]
    fn inverted_window_prefers_upcoming() {
        let now = at(2026, 1, 20, 12, 0);
        let start = Some(at(2026, 1, 25, 0, 0));
        let end = Some(at(2026, 1, 15, 0, 0));

        assert_eq!(status_at(now, start, end), FormStatus::Upcoming);
    }

    #[test]
    fn buckets_keep_order() {
        let scheduled = vec![
            Scheduled { record: 1, status: FormStatus::Open },
            Scheduled { record: 2, status: FormStatus::Closed },
            Scheduled { record: 3, status: FormStatus::Open },
            Scheduled { record: 4, status: FormStatus::Upcoming },
        ];

        let buckets = StatusBuckets::partition(scheduled);

        let open: Vec<i32> = buckets.open.iter().map(|s| s.record).collect();
        assert_eq!(open, vec![1, 3]);
        assert_eq!(buckets.upcoming.len(), 1);
        assert_eq!(buckets.closed.len(), 1);
        assert_eq!(buckets.len(), 4);
    }
}
