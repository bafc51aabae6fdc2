use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("invalid user id: {input:?}, provide a user id or profile url")]
    InvalidUserId { input: String },

    #[error("invalid date: {input:?}, expected format YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("cannot use both the png-only and jpeg-only filters")]
    ConfigConflict,

    #[error("unable to fetch page at cursor {cursor}: {msg}")]
    FetchPage { cursor: String, msg: String },

    #[error("unable to parse page at cursor {cursor}: {msg}")]
    ParsePage { cursor: String, msg: String },

    #[error("unexpected createdAt timestamp from api: {input:?}")]
    ApiTimestamp { input: String },

    #[error("error downloading image {url}: {msg}")]
    DownloadImage { url: String, msg: String },

    #[error("unsupported image format: {url}")]
    UnsupportedFormat { url: String },

    #[error("unable to write {path}: {msg}")]
    WriteFile { path: String, msg: String },
}
