use reqwest::StatusCode;
use std::error::Error as _;
use std::{thread::sleep, time::Duration};

use crate::config::ScrapeConfig;
use crate::video_id::VideoId;

pub const USER_AGENT_DEFAULT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRIES: u64 = 5;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("{url}: request failed with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url}: giving up after {attempts} attempts")]
    Exhausted { url: String, attempts: u64 },
}

fn get_error(error: &reqwest::Error) -> String {
    match error.source() {
        Some(e) => match e.source() {
            Some(e) => e.to_string(),
            None => e.to_string(),
        },
        None => error.to_string(),
    }
}

/// Fetch the watch page text for a resolved id, retrying transient
/// failures. A client error is retried once through the proxy, then
/// treated as terminal. Ids the resolver let through verbatim end up
/// here too; the response status is what validates them.
pub fn fetch_watch_page(
    id: &VideoId,
    scrape_config: Option<&ScrapeConfig>,
) -> Result<String, ScrapeError> {
    let url = id.watch_url();

    let opt_proxy = std::env::var("OPT_PROXY").unwrap_or_default();
    let proxy = scrape_config
        .and_then(|c| c.proxy.clone())
        .unwrap_or(opt_proxy);

    let timeout_secs = scrape_config
        .map(|c| c.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let retries = scrape_config.map(|c| c.retries).unwrap_or(DEFAULT_RETRIES);
    let user_agent = scrape_config
        .and_then(|c| c.user_agent.clone())
        .unwrap_or_else(|| USER_AGENT_DEFAULT.to_string());
    let accept_invalid_certs = scrape_config
        .map(|c| c.accept_invalid_certs)
        .unwrap_or(false);

    let mut r = 0;
    let mut force_proxy = false;
    loop {
        if r >= retries {
            return Err(ScrapeError::Exhausted { url, attempts: r });
        }

        if r > 0 {
            log::debug!("{id}: retrying");
        }

        r += 1;

        let mut client = reqwest::blocking::Client::builder()
            .user_agent(user_agent.as_str())
            .danger_accept_invalid_certs(accept_invalid_certs)
            .danger_accept_invalid_hostnames(accept_invalid_certs)
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(10));

        if force_proxy && !proxy.is_empty() {
            log::debug!("{id}: using proxy {proxy:#?}");
            client = client.proxy(reqwest::Proxy::all(&proxy).unwrap());
        }

        let client = client.build().unwrap();

        log::debug!("{id}: requesting {url}");

        let resp = match client.get(&url).send() {
            Ok(resp) => resp,
            Err(err) => {
                force_proxy = true;
                log::error!("{id}: {err}: {:#?}", get_error(&err));
                continue;
            }
        };

        let status = resp.status();

        if !status.is_success() {
            log::debug!("{id}: {:?}", status.to_string());
        }

        if status == StatusCode::OK {
            // we might get OK, but no text response.
            let bytes = match resp.bytes() {
                Ok(b) => b,
                Err(err) => {
                    log::debug!("{id}: {}", err.is_timeout());
                    force_proxy = true;
                    continue;
                }
            };

            return Ok(String::from_utf8_lossy(&bytes).to_string());
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            sleep(Duration::from_secs(r * 4));
        }

        if status.is_client_error() {
            // no need to try again, it's over...
            if force_proxy {
                return Err(ScrapeError::Status { url, status });
            }

            force_proxy = true;
        }
    }
}
