use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const USER_AGENT: &str = concat!("appforge/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Download a URL into `dest_dir`, keeping the URL's file name.
pub fn download_to(url: &str, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("asset URL has no file name: {url}"))?;
    let dest = dest_dir.join(file_name);

    let agent = ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build();
    let response = agent
        .get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .with_context(|| format!("request for {url} failed"))?;

    let mut reader = response.into_reader();
    let mut file = fs::File::create(&dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;
    io::copy(&mut reader, &mut file)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(dest)
}
