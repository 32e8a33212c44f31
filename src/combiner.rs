use crate::error::{LaadsError, LaadsResult};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuseInputs {
    pub terra_cmg: PathBuf,
    pub terra_cma: PathBuf,
    pub aqua_cma: PathBuf,
    pub aqua_cmg: PathBuf,
}

impl FuseInputs {
    pub fn paths(&self) -> [&Path; 4] {
        [
            &self.terra_cmg,
            &self.terra_cma,
            &self.aqua_cma,
            &self.aqua_cmg,
        ]
    }
}

/// Merges one day of CMG and CMA files into the atmospheric correction inputs.
pub trait Combiner {
    fn combine(&self, inputs: &FuseInputs, output_dir: &Path) -> LaadsResult<()>;
}

#[derive(Clone, Debug)]
pub struct CliCombiner {
    binary_path: PathBuf,
}

impl CliCombiner {
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    pub fn locate(program: &str) -> LaadsResult<Self> {
        which::which(program).map(Self::new).map_err(|err| {
            LaadsError::ExternalTool(format!("{} not found in PATH: {}", program, err))
        })
    }

    fn command(&self, inputs: &FuseInputs, output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.arg("--terra_cmg")
            .arg(&inputs.terra_cmg)
            .arg("--terra_cma")
            .arg(&inputs.terra_cma)
            .arg("--aqua_cmg")
            .arg(&inputs.aqua_cmg)
            .arg("--aqua_cma")
            .arg(&inputs.aqua_cma)
            .arg("--output_dir")
            .arg(output_dir);
        cmd
    }
}

impl Combiner for CliCombiner {
    fn combine(&self, inputs: &FuseInputs, output_dir: &Path) -> LaadsResult<()> {
        log::info!("Running {:?}", self.binary_path);

        let status = self
            .command(inputs, output_dir)
            .status()
            .map_err(|e| {
                LaadsError::ExternalTool(format!("failed to execute {:?}: {}", self.binary_path, e))
            })?;

        if !status.success() {
            return Err(LaadsError::ExternalTool(format!(
                "{:?} exited with {}",
                self.binary_path, status
            )));
        }

        Ok(())
    }
}
