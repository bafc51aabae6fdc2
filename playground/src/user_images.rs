use std::fmt;

use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date_range::parse_api_timestamp;
use crate::{DateRange, PlaygroundError, UserId};

static BASE_URL: &str = "https://playground.com/api/images/user";

// The API rejects requests with default client identification.
pub(crate) static BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

pub(crate) const PAGE_SIZE: usize = 250;

/// Opaque pagination token. The API hands back a number or string which is
/// echoed verbatim in the next request; the first page is requested with `0`.
#[derive(Debug, Clone)]
pub struct Cursor(Value);

impl Cursor {
    pub fn initial() -> Self {
        Self(Value::from(0))
    }

    fn as_query_value(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            v => v.to_string(),
        }
    }
}

impl From<Value> for Cursor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

/// One image post. Fields the archiver does not know about are kept as-is so
/// the metadata files contain everything the API returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_jpeg: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub images: Vec<ImageRecord>,
    pub cursor: Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Page {
    /// Drops every record whose creation time falls outside `range`,
    /// preserving order. With no bounds set the record timestamps are not
    /// even parsed, mirroring the filter being a no-op.
    pub fn retain_in_range(&mut self, range: &DateRange) -> Result<(), PlaygroundError> {
        if range.is_unbounded() {
            return Ok(());
        }

        let mut kept = Vec::with_capacity(self.images.len());
        for record in self.images.drain(..) {
            if range.contains(parse_api_timestamp(&record.created_at)?) {
                kept.push(record);
            }
        }
        self.images = kept;
        Ok(())
    }
}

pub(crate) fn page_url(user: &UserId, cursor: &Cursor, range: &DateRange) -> Url {
    #[derive(Serialize)]
    struct DateFilter {
        start: Option<String>,
        end: Option<String>,
    }

    let date_filter = DateFilter {
        start: range.start().map(|t| t.to_string()),
        end: range.end().map(|t| t.to_string()),
    };

    let mut url = Url::parse(BASE_URL).unwrap();
    url.query_pairs_mut()
        .append_pair("limit", &PAGE_SIZE.to_string())
        .append_pair("cursor", &cursor.as_query_value())
        .append_pair("userId", user.as_str())
        .append_pair("id", user.as_str())
        .append_pair("likedImages", "false")
        .append_pair("sortBy", "Newest")
        .append_pair("filter", "All")
        .append_pair("dateFilter", &serde_json::to_string(&date_filter).unwrap());
    url
}

pub(crate) async fn get_page(
    client: &Client,
    user: &UserId,
    cursor: &Cursor,
    range: &DateRange,
) -> Result<Page, PlaygroundError> {
    let err_func = |e: reqwest::Error| PlaygroundError::FetchPage {
        cursor: cursor.to_string(),
        msg: e.to_string(),
    };

    let text = client
        .get(page_url(user, cursor, range))
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(err_func)?
        .error_for_status()
        .map_err(err_func)?
        .text()
        .await
        .map_err(err_func)?;

    serde_json::from_str(&text).map_err(|e| PlaygroundError::ParsePage {
        cursor: cursor.to_string(),
        msg: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::HashMap;

    use serde_json::{json, Value};

    use super::{page_url, Cursor, ImageRecord, Page};
    use crate::{DateRange, UserId};

    pub(crate) fn record(created_at: &str, url: Option<&str>, url_jpeg: Option<&str>) -> ImageRecord {
        ImageRecord {
            created_at: created_at.to_owned(),
            url: url.map(str::to_owned),
            url_jpeg: url_jpeg.map(str::to_owned),
            extra: serde_json::Map::new(),
        }
    }

    fn query_map(url: &reqwest::Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn page_url_query_params() {
        let user = UserId::resolve("cl9xyz42").unwrap();
        let range = DateRange::new(Some("2024-01-01"), None).unwrap();
        let url = page_url(&user, &Cursor::initial(), &range);

        let query = query_map(&url);
        assert_eq!(query["limit"], "250");
        assert_eq!(query["cursor"], "0");
        assert_eq!(query["userId"], "cl9xyz42");
        assert_eq!(query["id"], "cl9xyz42");
        assert_eq!(query["likedImages"], "false");
        assert_eq!(query["sortBy"], "Newest");
        assert_eq!(query["filter"], "All");
        assert_eq!(
            query["dateFilter"],
            r#"{"start":"2024-01-01T00:00:00","end":null}"#
        );
    }

    #[test]
    fn string_cursor_is_echoed_verbatim() {
        let user = UserId::resolve("cl9xyz42").unwrap();
        let cursor = Cursor::from(Value::from("eyJvZmZzZXQiOjI1MH0"));
        let url = page_url(&user, &cursor, &DateRange::default());
        assert_eq!(query_map(&url)["cursor"], "eyJvZmZzZXQiOjI1MH0");
    }

    #[test]
    fn retain_preserves_order_and_is_idempotent() {
        let mut page = Page {
            images: vec![
                record("2024-03-01T10:00:00.000000Z", None, None),
                record("2024-02-01T10:00:00.000000Z", None, None),
                record("2024-01-01T10:00:00.000000Z", None, None),
            ],
            cursor: Value::from(250),
            extra: serde_json::Map::new(),
        };
        let range = DateRange::new(Some("2024-01-15"), Some("2024-03-15")).unwrap();

        page.retain_in_range(&range).unwrap();
        let kept: Vec<_> = page.images.iter().map(|r| r.created_at.clone()).collect();
        assert_eq!(
            kept,
            ["2024-03-01T10:00:00.000000Z", "2024-02-01T10:00:00.000000Z"]
        );

        // Filtering an already filtered page changes nothing
        page.retain_in_range(&range).unwrap();
        assert_eq!(page.images.len(), 2);
    }

    #[test]
    fn retain_may_drop_everything() {
        let mut page = Page {
            images: vec![record("2024-03-01T10:00:00.000000Z", None, None)],
            cursor: Value::from(250),
            extra: serde_json::Map::new(),
        };
        let range = DateRange::new(Some("2020-01-01"), Some("2020-12-31")).unwrap();
        page.retain_in_range(&range).unwrap();
        assert!(page.images.is_empty());
        // The pagination token is untouched by filtering
        assert_eq!(page.cursor, Value::from(250));
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let input = json!({
            "images": [{
                "createdAt": "2024-01-01T00:00:00.000000Z",
                "url": "https://images.playground.com/a.png",
                "prompt": "a red fox",
                "likeCount": 7,
            }],
            "cursor": 250,
            "totalImages": 1234,
        });

        let page: Page = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(page.images[0].extra["prompt"], "a red fox");
        assert_eq!(serde_json::to_value(&page).unwrap(), input);
    }
}
