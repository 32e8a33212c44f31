use std::{error::Error, time::Duration};

use clap::Parser;
use laads_aux::{
    Archive, CliCombiner, Config, Credentials, EarthDataPool, LadsSciFtp, TargetDate,
};

/// Download LAADS data for a given date and fuse it for LaSRC.
#[derive(Parser)]
#[command(name = "download_laads")]
#[command(about = "Download LAADS data for a given date.")]
struct Cli {
    /// Format: YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// EarthData username
    #[arg(long)]
    euser: String,

    /// EarthData password
    #[arg(long)]
    epass: String,

    /// Ladssci username
    #[arg(long)]
    luser: String,

    /// Ladssci password
    #[arg(long)]
    lpass: String,

    /// Base URL of the CMG data pool
    #[arg(long)]
    cmg_url: Option<String>,

    /// Host (optionally host:port) of the CMA FTP server
    #[arg(long)]
    cma_host: Option<String>,

    /// Combiner program, looked up on PATH
    #[arg(long)]
    combiner: Option<String>,

    /// Network timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let date = TargetDate::parse(&cli.date)?;

    let mut config = Config::from_env()?;
    if let Some(cmg_url) = cli.cmg_url {
        config.cmg_url = cmg_url;
    }
    if let Some(cma_host) = cli.cma_host {
        config.cma_host = cma_host;
    }
    if let Some(combiner) = cli.combiner {
        config.combiner = combiner;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    let combiner = CliCombiner::locate(&config.combiner)?;
    let archive = Archive::connect(config.output_dir())?;

    let mut cmg_remote = EarthDataPool::connect(
        &config.cmg_url,
        Credentials::new(cli.euser, cli.epass),
        config.timeout,
    )?;
    let mut cma_remote = LadsSciFtp::new(
        config.cma_host.as_str(),
        Credentials::new(cli.luser, cli.lpass),
        config.timeout,
    );

    archive.download_laads(date, &mut cmg_remote, &mut cma_remote, &combiner)?;

    log::info!("Finished {}", date);
    Ok(())
}
