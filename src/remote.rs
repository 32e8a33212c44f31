use crate::{date::TargetDate, error::LaadsResult, product::Product};

pub trait RemoteArchive {
    fn retrieve_remote_filenames(
        &mut self,
        prod: Product,
        date: TargetDate,
    ) -> LaadsResult<Vec<String>>;

    fn retrieve_remote_file(
        &mut self,
        prod: Product,
        date: TargetDate,
        remote_fname: &str,
    ) -> LaadsResult<Vec<u8>>;
}
