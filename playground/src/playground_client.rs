use reqwest::Client;

use crate::download_image::download_image;
use crate::user_images::{get_page, Cursor, Page, PAGE_SIZE};
use crate::{metadata, ArchiveConfig, DownloadStatus, PlaygroundError};

pub struct PlaygroundClient<'client> {
    client: &'client Client,
}

/// Counters reported when a run ends, by exhaustion or by page failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub downloaded: usize,
}

/// The pagination loop, spelled out. `Fetch` is the only state that can end
/// the run: an empty image list means the user's images are exhausted
/// (`Done`), and a fetch or parse failure is fatal (`Failed`). A page whose
/// records are all filtered out still advances back into `Fetch`.
enum RunState {
    Fetch(Cursor),
    Done,
    Failed(PlaygroundError),
}

impl<'client> PlaygroundClient<'client> {
    pub fn new(client: &'client Client) -> Self {
        Self { client }
    }

    /// Archives every image post of the configured user: walks the paginated
    /// listing, writes one metadata JSON file per page with records in range,
    /// and downloads the referenced image files into `png/` and `jpeg/`
    /// subtrees. A failed page fetch ends the run early; the summary then
    /// covers everything processed up to that point.
    pub async fn archive_user(
        &self,
        config: &ArchiveConfig,
    ) -> Result<RunSummary, PlaygroundError> {
        for dir in [config.output.clone(), config.png_dir(), config.jpeg_dir()] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| PlaygroundError::WriteFile {
                    path: dir.display().to_string(),
                    msg: e.to_string(),
                })?;
        }

        announce(config);

        let mut summary = RunSummary::default();
        let mut state = RunState::Fetch(Cursor::initial());
        loop {
            state = match state {
                RunState::Fetch(cursor) => {
                    println!(
                        "Fetching records {} to {}",
                        summary.processed + 1,
                        summary.processed + PAGE_SIZE
                    );
                    match get_page(self.client, &config.user_id, &cursor, &config.date_range).await
                    {
                        Ok(page) if page.images.is_empty() => {
                            println!("No more image records found.");
                            RunState::Done
                        }
                        Ok(page) => self.process_page(page, config, &mut summary).await?,
                        Err(e) => RunState::Failed(e),
                    }
                }
                RunState::Done => return Ok(summary),
                RunState::Failed(e) => {
                    eprintln!("{e}");
                    return Ok(summary);
                }
            };
        }
    }

    /// Filter, persist, download, advance. Transport errors on individual
    /// images are reported and skipped; everything else is fatal.
    async fn process_page(
        &self,
        mut page: Page,
        config: &ArchiveConfig,
        summary: &mut RunSummary,
    ) -> Result<RunState, PlaygroundError> {
        page.retain_in_range(&config.date_range)?;

        if let Some(path) = metadata::save_page(&page, &config.output).await? {
            println!(
                "Saved {} image records to {}",
                page.images.len(),
                path.display()
            );
        }

        for record in &page.images {
            for url in [record.url.as_deref(), record.url_jpeg.as_deref()]
                .into_iter()
                .flatten()
            {
                match download_image(self.client, url, record, config).await {
                    Ok(DownloadStatus::Downloaded(filename)) => {
                        println!("Downloaded: {filename}");
                        summary.downloaded += 1;
                    }
                    Ok(DownloadStatus::Exists) => summary.downloaded += 1,
                    Ok(DownloadStatus::Skipped) => {}
                    Err(
                        e @ (PlaygroundError::DownloadImage { .. }
                        | PlaygroundError::UnsupportedFormat { .. }),
                    ) => eprintln!("{e}"),
                    Err(e) => return Err(e),
                }
            }
        }

        summary.processed += page.images.len();
        Ok(RunState::Fetch(Cursor::from(page.cursor)))
    }
}

fn announce(config: &ArchiveConfig) {
    let mut line = String::from("Fetching images");
    if let Some(start) = config.date_range.start() {
        line.push_str(&format!(" from {}", start.strftime("%Y-%m-%d")));
    }
    if let Some(end) = config.date_range.end() {
        line.push_str(&format!(" to {}", end.strftime("%Y-%m-%d")));
    }
    println!("{line}");
}
