use std::path::{Path, PathBuf};

use crate::date_range::parse_api_timestamp;
use crate::{Page, PlaygroundError};

const FILENAME_TIMESTAMP_FMT: &str = "%Y-%m-%d-%H-%M";

/// Writes the page (with its already filtered image list) as pretty-printed
/// JSON, named `<earliest>-<latest>.json` after the creation times it covers.
/// An existing file of the same name is overwritten. Pages with no surviving
/// records produce no file.
///
/// The API returns records newest-first, so the earliest timestamp comes from
/// the last record and the latest from the first. Existing tooling depends on
/// this filename layout, keep it as is.
pub(crate) async fn save_page(
    page: &Page,
    output_dir: &Path,
) -> Result<Option<PathBuf>, PlaygroundError> {
    let (Some(newest), Some(oldest)) = (page.images.first(), page.images.last()) else {
        return Ok(None);
    };
    let earliest = parse_api_timestamp(&oldest.created_at)?;
    let latest = parse_api_timestamp(&newest.created_at)?;

    let filename = format!(
        "{}-{}.json",
        earliest.strftime(FILENAME_TIMESTAMP_FMT),
        latest.strftime(FILENAME_TIMESTAMP_FMT),
    );
    let path = output_dir.join(filename);

    let json = serde_json::to_vec_pretty(page).map_err(|e| PlaygroundError::WriteFile {
        path: path.display().to_string(),
        msg: e.to_string(),
    })?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| PlaygroundError::WriteFile {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

    Ok(Some(path))
}
