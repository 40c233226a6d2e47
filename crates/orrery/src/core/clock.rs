use std::fmt;

/// Average Earth year in days; also the year → day conversion for periods.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Calendar breakdown of elapsed simulated days, for HUD display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarTime {
    pub year: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CalendarTime {
    pub fn from_days(days: f64) -> Self {
        if !days.is_finite() || days <= 0.0 {
            return Self::default();
        }
        let total_hours = days * 24.0;
        let hours_per_year = 24.0 * DAYS_PER_YEAR;
        let year = (total_hours / hours_per_year).floor();
        let in_year = total_hours - year * hours_per_year;
        let day = (in_year / 24.0).floor();
        let in_day = in_year - day * 24.0;
        let hour = in_day.floor();
        let minute = ((in_day - hour) * 60.0).floor();

        Self {
            year: year as u32,
            day: day as u32,
            hour: hour as u32,
            minute: (minute as u32).min(59),
        }
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year {}, Day {}, {:02}:{:02}", self.year, self.day, self.hour, self.minute)
    }
}
