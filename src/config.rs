use homedir::my_home;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRIES: u64 = 5;

/// Watch page fetch settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts before giving up on a page
    #[serde(default = "default_retries")]
    pub retries: u64,

    /// Proxy for retried requests, e.g. socks5://127.0.0.1:9050.
    /// The OPT_PROXY environment variable is the fallback.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Overrides the default browser user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            proxy: None,
            user_agent: None,
            accept_invalid_certs: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retries() -> u64 {
    DEFAULT_RETRIES
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

pub fn base_path() -> String {
    std::env::var("YTMETA_BASE_PATH").unwrap_or(format!(
        "{}/.config/ytmeta",
        my_home()
            .expect("couldnt find home dir")
            .expect("couldnt find home dir")
            .to_string_lossy()
    ))
}

impl Config {
    pub fn validate(&mut self) {
        if self.scrape.retries == 0 {
            self.scrape.retries = 1
        }

        if self.scrape.timeout_secs == 0 {
            panic!("scrape.timeout_secs must be greater than 0");
        }

        if let Some(proxy) = &self.scrape.proxy {
            if let Err(err) = reqwest::Proxy::all(proxy) {
                panic!("scrape.proxy is not a valid proxy url: {err}");
            }
        }
    }

    pub fn load() -> Self {
        Self::load_with(&base_path())
    }

    pub fn load_with(base_path: &str) -> Self {
        let config_path = Path::new(base_path).join("config.yaml");

        // create new if does not exist
        if !config_path.exists() {
            fs::create_dir_all(base_path).expect("couldnt create config dir");
            fs::write(
                &config_path,
                serde_yml::to_string(&Self::default()).unwrap().as_bytes(),
            )
            .expect("couldnt write config.yaml");
        }

        let config_str = fs::read_to_string(&config_path).expect("couldnt read config.yaml");
        let mut config: Self = serde_yml::from_str(&config_str).expect("config is malformed");

        config.base_path = base_path.to_string();

        config.validate();

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config).unwrap() {
            config.save();
        }

        config
    }

    pub fn save(&self) {
        let config_path = Path::new(&self.base_path).join("config.yaml");

        let config_str = serde_yml::to_string(&self).unwrap();
        fs::write(config_path, config_str.as_bytes()).expect("couldnt write config.yaml");
    }
}
