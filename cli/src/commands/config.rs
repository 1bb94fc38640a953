//! Show or update the saved configuration.

use anyhow::Result;
use techops_business::BusinessConfig;

use crate::config::Config;
use crate::output::Output;

/// With no setters, print the effective configuration; otherwise save.
pub fn run_config(
    mut file: Config,
    effective: &BusinessConfig,
    set_api_url: Option<String>,
    set_page_size: Option<u32>,
) -> Result<()> {
    let out = Output::new();

    if set_api_url.is_none() && set_page_size.is_none() {
        out.header("Effective configuration");
        out.labeled_indent("API base URL", &effective.api_base_url, 2);
        out.labeled_indent("Page size", effective.page_size, 2);
        if let Ok(path) = Config::config_path() {
            out.labeled_indent("Config file", path.display(), 2);
        }
        return Ok(());
    }

    if let Some(url) = set_api_url {
        file.api.base_url = Some(url);
    }
    if let Some(page_size) = set_page_size {
        file.api.page_size = Some(page_size.max(1));
    }

    let path = file.save()?;
    out.success(format!("Saved {}", path.display()));
    Ok(())
}
