use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::PlaygroundError;

/// A validated Playground user id, either given directly or extracted from a
/// profile url such as `https://playground.com/profile/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(String);

impl UserId {
    pub fn resolve(input: &str) -> Result<Self, PlaygroundError> {
        static PROFILE_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"/profile/([a-zA-Z0-9]+)").unwrap());
        static ID_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

        let err = || PlaygroundError::InvalidUserId {
            input: input.to_owned(),
        };

        if input.starts_with("http") {
            let url = Url::parse(input).map_err(|_| err())?;
            let id = PROFILE_RE
                .captures(url.path())
                .and_then(|c| c.get(1))
                .ok_or_else(err)?;
            return Ok(Self(id.as_str().to_owned()));
        }

        if ID_RE.is_match(input) {
            return Ok(Self(input.to_owned()));
        }

        Err(err())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
