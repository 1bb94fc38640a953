use serde::Deserialize;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/techops";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Base URL of the techops service, without a trailing slash.
    pub api_base_url: String,
    /// Rows requested per page until a response says otherwise.
    pub page_size: u32,
}

/// Environment shape: `TECHOPS_API_BASE_URL`, `TECHOPS_PAGE_SIZE`.
#[derive(Debug, Deserialize)]
struct RawConfig {
    techops_api_base_url: Option<String>,
    techops_page_size: Option<u32>,
}

impl BusinessConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Read `TECHOPS_*` variables from the process environment.
    pub fn from_env() -> Result<Self, serde_env::Error> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`BusinessConfig::from_env`] but over an explicit variable set.
    pub fn from_vars<I, S>(vars: I) -> Result<Self, serde_env::Error>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawConfig = serde_env::from_iter(vars)?;
        let mut config = Self::default();

        if let Some(url) = raw.techops_api_base_url.filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(page_size) = raw.techops_page_size {
            config = config.with_page_size(page_size);
        }

        Ok(config)
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
