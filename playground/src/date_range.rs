use jiff::civil::{Date, DateTime};

use crate::PlaygroundError;

/// Format of every `createdAt` value the API hands back. Any deviation means
/// the API contract changed, so parse failures are fatal.
const API_TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S.%fZ";

pub(crate) fn parse_api_timestamp(input: &str) -> Result<DateTime, PlaygroundError> {
    DateTime::strptime(API_TIMESTAMP_FMT, input).map_err(|_| PlaygroundError::ApiTimestamp {
        input: input.to_owned(),
    })
}

fn parse_input_date(input: &str) -> Result<DateTime, PlaygroundError> {
    let date = Date::strptime("%Y-%m-%d", input).map_err(|_| PlaygroundError::InvalidDate {
        input: input.to_owned(),
    })?;
    Ok(DateTime::from(date))
}

/// Optional closed interval of creation times. Bounds are given as
/// `YYYY-MM-DD` and anchored to midnight of that day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Result<Self, PlaygroundError> {
        let start = start.map(parse_input_date).transpose()?;
        let end = end.map(parse_input_date).transpose()?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(PlaygroundError::InvalidDateRange {
                    start: s.strftime("%Y-%m-%d").to_string(),
                    end: e.strftime("%Y-%m-%d").to_string(),
                });
            }
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<DateTime> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, t: DateTime) -> bool {
        if self.start.is_some_and(|start| t < start) {
            return false;
        }
        if self.end.is_some_and(|end| t > end) {
            return false;
        }
        true
    }
}
