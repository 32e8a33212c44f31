/**************************************************************************************************
 *                                           Public API
 *************************************************************************************************/
pub use crate::{
    archive::Archive,
    combiner::{CliCombiner, Combiner, FuseInputs},
    config::{Config, Credentials},
    date::TargetDate,
    earthdata_remote::EarthDataPool,
    error::{LaadsError, LaadsResult},
    ladssci_remote::LadsSciFtp,
    listing::find_product_file,
    product::Product,
    remote::RemoteArchive,
    satellite::Satellite,
};
/**************************************************************************************************
 *                                      Private Implementation
 *************************************************************************************************/
mod archive;
mod combiner;
mod config;
mod date;
mod earthdata_remote;
mod error;
mod ladssci_remote;
mod listing;
mod product;
mod remote;
mod satellite;
