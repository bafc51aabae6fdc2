use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueHint};
use playground::{ArchiveConfig, DateRange, FormatFilter, UserId};

/// Fetch and download image records from Playground
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// User ID or profile URL to fetch images from
    user_id: String,

    /// Output directory for downloaded data
    #[arg(short, long, default_value = "downloaded_data", value_hint = ValueHint::DirPath)]
    output: PathBuf,

    /// Download only PNG images
    #[arg(long)]
    only_png: bool,

    /// Download only JPEG images
    #[arg(long)]
    only_jpeg: bool,

    /// Rename files to their creation date
    #[arg(long)]
    name_by_date: bool,

    /// Start date for image fetch (format: YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// End date for image fetch (format: YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,
}

impl Args {
    pub fn into_config(self) -> Result<ArchiveConfig> {
        Ok(ArchiveConfig {
            user_id: UserId::resolve(&self.user_id)?,
            format_filter: FormatFilter::from_flags(self.only_png, self.only_jpeg)?,
            date_range: DateRange::new(self.start_date.as_deref(), self.end_date.as_deref())?,
            output: self.output,
            name_by_date: self.name_by_date,
        })
    }
}
