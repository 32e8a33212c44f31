use std::{
    fs::{create_dir_all, read_dir, remove_file, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    combiner::{Combiner, FuseInputs},
    date::TargetDate,
    error::{LaadsError, LaadsResult},
    product::Product,
    remote::RemoteArchive,
    satellite::Satellite,
};

pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn connect<P>(root_path: P) -> LaadsResult<Self>
    where
        P: Into<PathBuf>,
    {
        let root = root_path.into();
        if !root.exists() {
            create_dir_all(&root)?;
            log::debug!("Creating path: {:?}", root);
        }

        log::info!("Connected to archive at: {:?}", &root);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Download the CMG and CMA products for `date`, fuse them and remove the downloads.
    ///
    /// Stops at the first failure. Files already downloaded are left in place.
    pub fn download_laads<C, A, K>(
        &self,
        date: TargetDate,
        cmg_remote: &mut C,
        cma_remote: &mut A,
        combiner: &K,
    ) -> LaadsResult<FuseInputs>
    where
        C: RemoteArchive,
        A: RemoteArchive,
        K: Combiner,
    {
        Self::validate_date(date)?;

        for &prod in &Product::CMG {
            self.retrieve_product(cmg_remote, prod, date)?;
        }

        for &prod in &Product::CMA {
            self.retrieve_product(cma_remote, prod, date)?;
        }

        self.fuse(date, combiner)
    }

    pub fn retrieve_product<R: RemoteArchive>(
        &self,
        remote: &mut R,
        prod: Product,
        date: TargetDate,
    ) -> LaadsResult<PathBuf> {
        log::info!("Retrieving {} for {}", prod.code(), date);

        let remote_fname = remote
            .retrieve_remote_filenames(prod, date)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                LaadsError::not_found(format!("no {} files listed for {}", prod.code(), date))
            })?;

        let data = remote.retrieve_remote_file(prod, date, &remote_fname)?;

        let local_path = self.root.join(&remote_fname);
        let mut f = File::create(&local_path)?;
        f.write_all(&data)?;

        log::debug!("Saved {:?}", local_path);
        Ok(local_path)
    }

    pub fn fuse<K: Combiner>(&self, date: TargetDate, combiner: &K) -> LaadsResult<FuseInputs> {
        let date_id = date.date_id();
        log::info!("Fusing products for {} (id {})", date, date_id);

        let inputs = FuseInputs {
            terra_cmg: self.locate_product(Product::TerraCmg, &date_id)?,
            terra_cma: self.locate_product(Product::TerraCma, &date_id)?,
            aqua_cma: self.locate_product(Product::AquaCma, &date_id)?,
            aqua_cmg: self.locate_product(Product::AquaCmg, &date_id)?,
        };

        combiner.combine(&inputs, &self.root)?;

        for pth in inputs.paths().iter() {
            remove_file(pth)?;
            log::debug!("Removed {:?}", pth);
        }

        Ok(inputs)
    }

    pub fn locate_product(&self, prod: Product, date_id: &str) -> LaadsResult<PathBuf> {
        let mut candidates: Vec<PathBuf> = read_dir(&self.root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|pth| pth.is_file())
            .filter(|pth| {
                pth.file_name()
                    .and_then(|fname| fname.to_str())
                    .map(|fname| matches_product(fname, prod, date_id))
                    .unwrap_or(false)
            })
            .collect();

        candidates.sort();

        candidates.into_iter().next().ok_or_else(|| {
            LaadsError::not_found(format!(
                "no {}*{}*.hdf in {:?}",
                prod.code(),
                date_id,
                self.root
            ))
        })
    }
}

// Private associated functions.

impl Archive {
    fn validate_date(date: TargetDate) -> LaadsResult<()> {
        for sat in &Satellite::ALL {
            let earliest = sat.earliest_operational_date();
            if date.date() < earliest {
                log::error!("No {:?} data before {}: requested {}", sat, earliest, date);
                return Err(LaadsError::not_found(format!(
                    "no {:?} MODIS data before {}",
                    sat, earliest
                )));
            }
        }

        Ok(())
    }
}

fn matches_product(fname: &str, prod: Product, date_id: &str) -> bool {
    fname
        .strip_prefix(prod.code())
        .and_then(|rest| rest.strip_suffix(".hdf"))
        .map(|middle| middle.contains(date_id))
        .unwrap_or(false)
}
