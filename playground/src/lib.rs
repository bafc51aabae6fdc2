mod config;
mod date_range;
mod download_image;
mod error;
mod metadata;
mod playground_client;
mod user_id;
mod user_images;

pub use config::{ArchiveConfig, FormatFilter};
pub use date_range::DateRange;
pub use download_image::DownloadStatus;
pub use error::PlaygroundError;
pub use playground_client::{PlaygroundClient, RunSummary};
pub use user_id::UserId;
pub use user_images::{Cursor, ImageRecord, Page};
