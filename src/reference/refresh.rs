//! Refresh-if-stale download of cached reference files.

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, Utc};
use reqwest::{Client, header::LAST_MODIFIED};
use tokio::io::AsyncWriteExt;

use super::ReferenceError;

/// One progress dot is printed per this many bytes received.
const DOT_EVERY: u64 = 1024 * 1024;

/// Result of a [`refresh`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Local copy is at least as new as the remote one.
    UpToDate,
    /// Local copy was replaced.
    Downloaded {
        /// Bytes written.
        bytes: u64,
    },
}

/// Builds the HTTP client used for reference downloads.
pub fn build_client() -> Result<Client, ReferenceError> {
    Ok(Client::builder()
        .user_agent(concat!("sotalog/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(300))
        .build()?)
}

/// Decides whether a download is due.
///
/// A missing local copy always needs one. Without a server timestamp an existing
/// local copy is kept.
pub fn needs_refresh(remote: Option<DateTime<Utc>>, local: Option<DateTime<Utc>>) -> bool {
    match (remote, local) {
        (_, None) => true,
        (Some(remote), Some(local)) => remote > local,
        (None, Some(_)) => false,
    }
}

/// Modification time of `path`, or `None` if it cannot be read.
pub fn local_mtime(path: &Path) -> Option<DateTime<Utc>> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}

/// Parses an HTTP-date header value such as `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Issues a HEAD request for `url` and downloads it over `local` when the server
/// copy is newer, printing a dot per MiB to `progress`.
pub async fn refresh<W: Write>(
    client: &Client,
    url: &str,
    local: &Path,
    progress: &mut W,
) -> Result<RefreshOutcome, ReferenceError> {
    if let Some(dir) = local.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }

    let head = client.head(url).send().await?.error_for_status()?;
    let remote = head
        .headers()
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date);
    let local_time = local_mtime(local);

    if !needs_refresh(remote, local_time) {
        tracing::debug!(url, ?remote, ?local_time, "reference cache is current");
        return Ok(RefreshOutcome::UpToDate);
    }

    let name = local
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| url.to_string());
    write!(progress, "Updating {name} ")?;
    progress.flush()?;

    let partial = partial_path(local);
    let bytes = match download(client, url, &partial, progress).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let _ = tokio::fs::remove_file(&partial).await;
            writeln!(progress)?;
            return Err(err);
        }
    };
    writeln!(progress)?;

    tokio::fs::rename(&partial, local).await?;
    tracing::info!(url, bytes, path = %local.display(), "reference cache updated");
    Ok(RefreshOutcome::Downloaded { bytes })
}

async fn download<W: Write>(
    client: &Client,
    url: &str,
    dest: &Path,
    progress: &mut W,
) -> Result<u64, ReferenceError> {
    let mut resp = client.get(url).send().await?.error_for_status()?;
    let mut file = tokio::fs::File::create(dest).await?;
    let mut bytes = 0u64;
    let mut next_dot = DOT_EVERY;

    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk).await?;
        bytes += chunk.len() as u64;
        while bytes >= next_dot {
            write!(progress, ".")?;
            progress.flush()?;
            next_dot += DOT_EVERY;
        }
    }
    file.flush().await?;
    Ok(bytes)
}

fn partial_path(local: &Path) -> PathBuf {
    let mut name = local.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    local.with_file_name(name)
}
