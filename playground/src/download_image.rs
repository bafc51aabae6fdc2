use std::path::{Path, PathBuf};

use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};

use crate::date_range::parse_api_timestamp;
use crate::user_images::BROWSER_USER_AGENT;
use crate::{ArchiveConfig, FormatFilter, ImageRecord, PlaygroundError};

const DATE_PREFIX_FMT: &str = "%Y-%m-%d_%H-%M-%S";

/// Outcome of a single download attempt. The orchestrator decides what each
/// outcome means for counting and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    /// Fetched and written to disk; carries the destination filename.
    Downloaded(String),
    /// Destination already on disk, no request was made.
    Exists,
    /// Rejected by the active format filter.
    Skipped,
}

#[derive(Debug, Clone, Copy)]
enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    fn from_url(url: &str) -> Option<Self> {
        if url.ends_with(".png") {
            Some(Self::Png)
        } else if url.ends_with(".jpeg") || url.ends_with(".jpg") {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    fn dir(self, config: &ArchiveConfig) -> PathBuf {
        match self {
            Self::Png => config.png_dir(),
            Self::Jpeg => config.jpeg_dir(),
        }
    }
}

fn image_filename(
    url: &Url,
    record: &ImageRecord,
    name_by_date: bool,
) -> Result<String, PlaygroundError> {
    let basename = Path::new(url.path())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name_by_date {
        let created_at = parse_api_timestamp(&record.created_at)?;
        Ok(format!("{}_{}", created_at.strftime(DATE_PREFIX_FMT), basename))
    } else {
        Ok(basename)
    }
}

/// Downloads one image to the format subdirectory of the output tree.
/// Re-runs are idempotent: a destination file already on disk counts as
/// downloaded without touching the network.
pub(crate) async fn download_image(
    client: &Client,
    url: &str,
    record: &ImageRecord,
    config: &ArchiveConfig,
) -> Result<DownloadStatus, PlaygroundError> {
    match config.format_filter {
        FormatFilter::PngOnly if !url.ends_with(".png") => return Ok(DownloadStatus::Skipped),
        FormatFilter::JpegOnly if !(url.ends_with(".jpeg") || url.ends_with(".jpg")) => {
            return Ok(DownloadStatus::Skipped)
        }
        _ => {}
    }

    let format = ImageFormat::from_url(url).ok_or_else(|| PlaygroundError::UnsupportedFormat {
        url: url.to_owned(),
    })?;

    let parsed = Url::parse(url).map_err(|e| PlaygroundError::DownloadImage {
        url: url.to_owned(),
        msg: e.to_string(),
    })?;
    let filename = image_filename(&parsed, record, config.name_by_date)?;
    let dest = format.dir(config).join(&filename);

    if tokio::fs::metadata(&dest).await.is_ok() {
        return Ok(DownloadStatus::Exists);
    }

    let err_func = |e: reqwest::Error| PlaygroundError::DownloadImage {
        url: url.to_owned(),
        msg: e.to_string(),
    };
    let bytes = client
        .get(parsed)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(err_func)?
        .error_for_status()
        .map_err(err_func)?
        .bytes()
        .await
        .map_err(err_func)?;

    tokio::fs::write(&dest, &bytes)
        .await
        .map_err(|e| PlaygroundError::WriteFile {
            path: dest.display().to_string(),
            msg: e.to_string(),
        })?;

    Ok(DownloadStatus::Downloaded(filename))
}
