use crate::{
    config::Credentials, date::TargetDate, error::LaadsResult, product::Product,
    remote::RemoteArchive,
};
use std::{
    io::{Error as IoError, ErrorKind},
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};
use suppaftp::{types::FileType, FtpError, FtpStream};

const FTP_PORT: u16 = 21;

/// The LADS science FTP server serving the CMA products.
///
/// One session is opened on first use and kept until drop. The timeout bounds connecting and
/// reading on both the control and the data connections.
pub struct LadsSciFtp {
    host: String,
    credentials: Credentials,
    timeout: Duration,
    session: Option<FtpStream>,
}

impl LadsSciFtp {
    pub fn new<S: Into<String>>(host: S, credentials: Credentials, timeout: Duration) -> Self {
        LadsSciFtp {
            host: host.into(),
            credentials,
            timeout,
            session: None,
        }
    }

    fn session(&mut self) -> LaadsResult<&mut FtpStream> {
        let ftp = match self.session.take() {
            Some(ftp) => ftp,
            None => self.open_session()?,
        };

        Ok(self.session.insert(ftp))
    }

    fn open_session(&self) -> LaadsResult<FtpStream> {
        let addr = self.resolve()?;
        log::info!("Connecting to CMA server: {} ({})", self.host, addr);

        let timeout = self.timeout;
        let mut ftp = FtpStream::connect_timeout(addr, timeout)?.passive_stream_builder(
            move |addr| {
                let stream = TcpStream::connect_timeout(&addr, timeout)
                    .map_err(FtpError::ConnectionError)?;
                stream
                    .set_read_timeout(Some(timeout))
                    .map_err(FtpError::ConnectionError)?;
                Ok(stream)
            },
        );
        ftp.get_ref().set_read_timeout(Some(timeout))?;
        ftp.login(&self.credentials.username, &self.credentials.password)?;
        ftp.transfer_type(FileType::Binary)?;

        Ok(ftp)
    }

    fn resolve(&self) -> LaadsResult<SocketAddr> {
        let target = if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, FTP_PORT)
        };

        let addr = target.to_socket_addrs()?.next().ok_or_else(|| {
            IoError::new(
                ErrorKind::NotFound,
                format!("no address found for {}", target),
            )
        })?;

        Ok(addr)
    }
}

impl RemoteArchive for LadsSciFtp {
    fn retrieve_remote_filenames(
        &mut self,
        prod: Product,
        date: TargetDate,
    ) -> LaadsResult<Vec<String>> {
        let dir = prod.ftp_directory(date);
        log::debug!("Listing FTP directory: {}", dir);

        let ftp = self.session()?;
        ftp.cwd(&dir)?;
        let entries = ftp.nlst(None)?;

        Ok(entries.iter().map(|entry| base_name(entry)).collect())
    }

    fn retrieve_remote_file(
        &mut self,
        prod: Product,
        date: TargetDate,
        remote_fname: &str,
    ) -> LaadsResult<Vec<u8>> {
        let dir = prod.ftp_directory(date);
        log::debug!("Downloading: {}/{}", dir, remote_fname);

        let ftp = self.session()?;
        ftp.cwd(&dir)?;
        let data = ftp.retr_as_buffer(remote_fname)?;

        Ok(data.into_inner())
    }
}

impl Drop for LadsSciFtp {
    fn drop(&mut self) {
        if let Some(mut ftp) = self.session.take() {
            if let Err(err) = ftp.quit() {
                log::warn!("Error closing FTP session to {}: {}", self.host, err);
            }
        }
    }
}

// Some servers answer NLST with full paths.
fn base_name(entry: &str) -> String {
    match entry.rfind('/') {
        Some(i) => String::from(&entry[(i + 1)..]),
        None => entry.to_owned(),
    }
}
