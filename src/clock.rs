use chrono::NaiveDate;

/// Source of "today" for anything that depends on the calendar.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Today in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate + Send + Sync,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}

/// A clock stuck on `date`.
#[cfg(test)]
pub fn fixed(date: NaiveDate) -> impl Clock + Clone {
    move || date
}
