use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::{LaadsError, LaadsResult};
use chrono::{naive::NaiveDate, naive::NaiveDateTime, Datelike};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetDate(NaiveDate);

impl TargetDate {
    pub fn parse(input: &str) -> LaadsResult<Self> {
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(TargetDate)
            .map_err(|source| LaadsError::Parse {
                input: input.to_owned(),
                source,
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    pub fn listing_stamp(&self) -> String {
        self.0.format("%Y.%m.%d").to_string()
    }

    /// Year followed by the unpadded day of year, e.g. `20205` for 2020-01-05.
    ///
    /// Used to pick downloaded files out of the working directory. Distinct days can share an
    /// identifier, and one identifier can be a substring of another.
    pub fn date_id(&self) -> String {
        format!("{}{}", self.year(), self.day_of_year())
    }
}

impl FromStr for TargetDate {
    type Err = LaadsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetDate::parse(s)
    }
}

impl From<NaiveDate> for TargetDate {
    fn from(date: NaiveDate) -> Self {
        TargetDate(date)
    }
}

impl From<NaiveDateTime> for TargetDate {
    fn from(date_time: NaiveDateTime) -> Self {
        TargetDate(date_time.date())
    }
}

impl Display for TargetDate {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
