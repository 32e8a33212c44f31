use crate::{
    config::Credentials,
    date::TargetDate,
    error::{LaadsError, LaadsResult},
    listing,
    product::Product,
    remote::RemoteArchive,
};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::LOCATION,
    redirect::Policy,
    IntoUrl, Url,
};
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

/// The USGS/EarthData HTTP data pool serving the CMG products.
///
/// Redirects are followed by hand so the Basic credentials go out on every hop, including the
/// EarthData login host.
#[derive(Debug, Clone)]
pub struct EarthDataPool {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl EarthDataPool {
    pub fn connect(base_url: &str, credentials: Credentials, timeout: Duration) -> LaadsResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        log::info!("Using CMG data pool at: {}", base_url);
        Ok(EarthDataPool {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    // <base>/<pool>/<code>.006/<YYYY.MM.DD>
    fn listing_url(&self, prod: Product, date: TargetDate) -> String {
        [
            self.base_url.as_str(),
            prod.pool_directory().as_str(),
            date.listing_stamp().as_str(),
        ]
        .join("/")
    }

    fn request<U: IntoUrl>(&self, url: U, authenticate: bool) -> RequestBuilder {
        let req = self.client.get(url);
        if authenticate {
            req.basic_auth(&self.credentials.username, Some(&self.credentials.password))
        } else {
            req
        }
    }

    fn get(&self, url: &str, authenticate: bool) -> LaadsResult<Response> {
        let mut resp = self.request(url, authenticate).send()?;

        for _ in 0..MAX_REDIRECTS {
            if !resp.status().is_redirection() {
                return Ok(resp.error_for_status()?);
            }

            let next = match redirect_target(&resp) {
                Some(next) => next,
                None => return Ok(resp.error_for_status()?),
            };

            log::debug!("Redirected to: {}", next);
            resp = self.request(next, authenticate).send()?;
        }

        if resp.status().is_redirection() {
            return Err(LaadsError::TooManyRedirects(url.to_owned()));
        }

        Ok(resp.error_for_status()?)
    }
}

fn redirect_target(resp: &Response) -> Option<Url> {
    let location = resp.headers().get(LOCATION)?.to_str().ok()?;
    resp.url().join(location).ok()
}

impl RemoteArchive for EarthDataPool {
    fn retrieve_remote_filenames(
        &mut self,
        prod: Product,
        date: TargetDate,
    ) -> LaadsResult<Vec<String>> {
        let url = self.listing_url(prod, date);
        log::debug!("Fetching listing: {}", url);

        let page = self.get(&url, false)?.text()?;

        Ok(vec![listing::find_product_file(&page, prod)?])
    }

    fn retrieve_remote_file(
        &mut self,
        prod: Product,
        date: TargetDate,
        remote_fname: &str,
    ) -> LaadsResult<Vec<u8>> {
        let url = [self.listing_url(prod, date).as_str(), remote_fname].join("/");
        log::debug!("Downloading: {}", url);

        let data = self.get(&url, true)?.bytes()?;

        Ok(data.to_vec())
    }
}
