use chrono::{Datelike, Months, NaiveDate};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Whole days since 1970-01-01.
pub fn epoch_days(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}

/// Seconds since 1970-01-01T00:00:00 at the start of `date`.
pub fn epoch_seconds(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) * 86_400
}

/// Inverse of [`epoch_days`], truncating any fractional day.
pub fn date_from_epoch_days(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() || days.abs() > f64::from(i32::MAX / 2) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days.floor() as i32 + UNIX_EPOCH_DAYS_FROM_CE)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Month-end dates of the `periods` months following the month of `last`.
pub fn future_month_ends(last: NaiveDate, periods: usize) -> Option<Vec<NaiveDate>> {
    let start = last.with_day(1)?;
    (1..=periods)
        .map(|i| {
            let month = start.checked_add_months(Months::new(u32::try_from(i).ok()?))?;
            month_end(month)
        })
        .collect()
}
