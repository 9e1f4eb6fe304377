const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
const DEFAULT_LOG_DIR: &str = "./log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) api_base_url: String,
    pub(crate) log_to_console: bool,
    pub(crate) log_dir: String,
}

pub(crate) static CONFIG: std::sync::LazyLock<Config> = std::sync::LazyLock::new(|| {
    // A missing .env file is fine, everything has a default.
    let _ = dotenvy::dotenv();

    Config::from_lookup(|key| std::env::var(key).ok()).expect("Invalid configuration")
});

pub(crate) fn config() -> &'static Config {
    &CONFIG
}

impl Config {
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = lookup("HN_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let log_to_console = match lookup("HN_LOG_TO_CONSOLE") {
            Some(value) => value.parse().map_err(|_| {
                anyhow::anyhow!("HN_LOG_TO_CONSOLE must be true or false, got {value:?}")
            })?,
            None => false,
        };

        Ok(Self {
            api_base_url,
            log_to_console,
            log_dir: lookup("HN_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
        })
    }
}
