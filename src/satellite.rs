use chrono::naive::NaiveDate;
use strum::IntoStaticStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum Satellite {
    #[strum(serialize = "MOLT")]
    Terra,
    #[strum(serialize = "MOLA")]
    Aqua,
}

impl Satellite {
    pub const ALL: [Satellite; 2] = [Satellite::Terra, Satellite::Aqua];

    pub fn earliest_operational_date(&self) -> NaiveDate {
        match *self {
            Satellite::Terra => NaiveDate::from_ymd_opt(2000, 2, 24),
            Satellite::Aqua => NaiveDate::from_ymd_opt(2002, 7, 4),
        }
        .unwrap_or(NaiveDate::MIN)
    }
}
