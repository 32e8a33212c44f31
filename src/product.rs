use crate::{date::TargetDate, satellite::Satellite};
use strum::IntoStaticStr;

const CMG_COLLECTION: &str = "006";
const CMA_COLLECTION: &str = "6";

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum Product {
    #[strum(serialize = "MOD09CMG")]
    TerraCmg,
    #[strum(serialize = "MYD09CMG")]
    AquaCmg,
    #[strum(serialize = "MOD09CMA")]
    TerraCma,
    #[strum(serialize = "MYD09CMA")]
    AquaCma,
}

impl Product {
    pub const CMG: [Product; 2] = [Product::TerraCmg, Product::AquaCmg];

    pub const CMA: [Product; 2] = [Product::TerraCma, Product::AquaCma];

    pub fn code(&self) -> &'static str {
        (*self).into()
    }

    pub fn satellite(&self) -> Satellite {
        match *self {
            Product::TerraCmg | Product::TerraCma => Satellite::Terra,
            Product::AquaCmg | Product::AquaCma => Satellite::Aqua,
        }
    }

    pub fn pool_directory(&self) -> String {
        let pool: &'static str = self.satellite().into();
        format!("{}/{}.{}", pool, self.code(), CMG_COLLECTION)
    }

    pub fn ftp_directory(&self, date: TargetDate) -> String {
        format!(
            "/{}/{}/{}/{:03}",
            CMA_COLLECTION,
            self.code(),
            date.year(),
            date.day_of_year()
        )
    }
}
