use std::{
    env,
    ffi::OsString,
    fmt::{Debug, Formatter},
    path::PathBuf,
    time::Duration,
};

use crate::error::{LaadsError, LaadsResult};

pub const AUX_DIR_VAR: &str = "L8_AUX_DIR";
pub const OUTPUT_SUBDIR: &str = "LADS";

pub const DEFAULT_CMG_URL: &str = "http://e4ftl01.cr.usgs.gov";
pub const DEFAULT_CMA_HOST: &str = "ladssci.nascom.nasa.gov";
pub const DEFAULT_COMBINER: &str = "combine_l8_aux_data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub aux_dir: PathBuf,
    pub cmg_url: String,
    pub cma_host: String,
    pub combiner: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new<P: Into<PathBuf>>(aux_dir: P) -> Self {
        Config {
            aux_dir: aux_dir.into(),
            cmg_url: DEFAULT_CMG_URL.to_owned(),
            cma_host: DEFAULT_CMA_HOST.to_owned(),
            combiner: DEFAULT_COMBINER.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> LaadsResult<Self> {
        Self::from_aux_dir_var(env::var_os(AUX_DIR_VAR))
    }

    fn from_aux_dir_var(value: Option<OsString>) -> LaadsResult<Self> {
        match value {
            Some(dir) if !dir.is_empty() => Ok(Config::new(dir)),
            _ => Err(LaadsError::Config(format!("{} must be set", AUX_DIR_VAR))),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.aux_dir.join(OUTPUT_SUBDIR)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
