use chrono::NaiveDate;

/// Descending enumeration of calendar dates, from `end` down to `start`,
/// both inclusive.
///
/// The archive is browsed newest-first, so the iterator yields `end` first.
/// An inverted range (`start > end`) is simply empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sensorfetch::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2020, 6, 3).unwrap();
/// let dates: Vec<_> = DateRange::descending(start, end).collect();
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[0], end);
/// assert_eq!(dates[2], start);
/// ```
#[derive(Debug, Clone)]
pub struct DateRange {
    start: NaiveDate,
    current: Option<NaiveDate>,
}

impl DateRange {
    pub fn descending(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            current: Some(end),
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let date = self.current?;
        if date < self.start {
            self.current = None;
            return None;
        }
        self.current = date.pred_opt();
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn yields_descending_inclusive() {
        let dates: Vec<_> = DateRange::descending(date(2020, 5, 29), date(2020, 6, 2)).collect();
        assert_eq!(
            dates,
            vec![
                date(2020, 6, 2),
                date(2020, 6, 1),
                date(2020, 5, 31),
                date(2020, 5, 30),
                date(2020, 5, 29),
            ]
        );
    }

    #[test]
    fn length_matches_span() {
        let start = date(2019, 12, 25);
        let end = date(2020, 1, 5);
        let dates: Vec<_> = DateRange::descending(start, end).collect();
        assert_eq!(dates.len() as i64, (end - start).num_days() + 1);
        // No gaps, no repeats.
        for pair in dates.windows(2) {
            assert_eq!(pair[0].pred_opt().unwrap(), pair[1]);
        }
    }

    #[test]
    fn single_day_range() {
        let d = date(2020, 6, 1);
        let dates: Vec<_> = DateRange::descending(d, d).collect();
        assert_eq!(dates, vec![d]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let dates: Vec<_> = DateRange::descending(date(2020, 6, 2), date(2020, 6, 1)).collect();
        assert!(dates.is_empty());
    }
}
