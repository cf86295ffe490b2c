//! Feed response classification and CSV decoding.

use std::fmt;

use tracing::{error, warn};

use crate::domain::{ROW_FIELDS, RawRow};

use super::client::FeedResponse;

/// Classification of a provider status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Ok,
    MovedTemporarily,
    NotFound,
    Unavailable,
    Other(u16),
}

impl FeedStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => FeedStatus::Ok,
            302 => FeedStatus::MovedTemporarily,
            404 => FeedStatus::NotFound,
            503 => FeedStatus::Unavailable,
            other => FeedStatus::Other(other),
        }
    }

    /// The numeric status this classification was built from.
    pub fn code(&self) -> u16 {
        match self {
            FeedStatus::Ok => 200,
            FeedStatus::MovedTemporarily => 302,
            FeedStatus::NotFound => 404,
            FeedStatus::Unavailable => 503,
            FeedStatus::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FeedStatus::Ok)
    }
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedStatus::Ok => write!(f, "(200) ok"),
            FeedStatus::MovedTemporarily => write!(f, "(302) server moved temporarily"),
            FeedStatus::NotFound => write!(f, "(404) not found"),
            FeedStatus::Unavailable => write!(f, "(503) server unavailable"),
            FeedStatus::Other(code) => write!(f, "({code}) an error occurred"),
        }
    }
}

/// Decode a provider response into raw rows.
///
/// Anything other than a 200 is logged at error level and yields no rows.
pub fn decode(response: &FeedResponse) -> Vec<RawRow> {
    let status = FeedStatus::from_code(response.status);
    if !status.is_ok() {
        error!(status = status.code(), "{status}");
        return Vec::new();
    }

    decode_body(&response.body)
}

/// Decode a 200 body: strip feed noise, drop the header line, split the rest.
///
/// Rows without exactly [`ROW_FIELDS`] fields are skipped.
pub fn decode_body(body: &str) -> Vec<RawRow> {
    let cleaned: String = body.chars().filter(|c| !matches!(c, '\r' | '"')).collect();

    let Some((_header, records)) = cleaned.split_once('\n') else {
        return Vec::new();
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(records.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping unreadable feed row");
                continue;
            }
        };

        // Header was line 1 of the body.
        let line = record.position().map(|p| p.line() + 1).unwrap_or_default();
        match RawRow::from_fields(record.iter()) {
            Some(row) => rows.push(row),
            None => warn!(
                line,
                fields = record.len(),
                expected = ROW_FIELDS,
                "skipping malformed feed row"
            ),
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log::CapturedLogs;
    use proptest::prelude::*;

    const HEADER: &str = "id,desc,lat,flag,lon,a,b";

    fn fields(row: &RawRow) -> Vec<&str> {
        row.0.iter().map(String::as_str).collect()
    }

    #[test]
    fn classify_statuses() {
        assert_eq!(FeedStatus::from_code(200), FeedStatus::Ok);
        assert_eq!(FeedStatus::from_code(302), FeedStatus::MovedTemporarily);
        assert_eq!(FeedStatus::from_code(404), FeedStatus::NotFound);
        assert_eq!(FeedStatus::from_code(503), FeedStatus::Unavailable);
        assert_eq!(FeedStatus::from_code(999), FeedStatus::Other(999));
    }

    #[test]
    fn status_messages_carry_code() {
        assert_eq!(
            FeedStatus::from_code(302).to_string(),
            "(302) server moved temporarily"
        );
        assert_eq!(FeedStatus::from_code(404).to_string(), "(404) not found");
        assert_eq!(
            FeedStatus::from_code(503).to_string(),
            "(503) server unavailable"
        );
        assert_eq!(
            FeedStatus::from_code(999).to_string(),
            "(999) an error occurred"
        );
    }

    #[test]
    fn non_ok_statuses_yield_no_rows() {
        let body = format!("{HEADER}\n1,10-Centro-Main,-23.5,1,-46.6,x,y\n");
        for code in [302, 404, 503, 999] {
            let response = FeedResponse::new(code, body.clone());
            assert!(decode(&response).is_empty(), "status {code}");
            assert_eq!(FeedStatus::from_code(code).code(), code);
        }
    }

    #[test]
    fn non_ok_status_is_logged_as_error_with_code() {
        for (code, message) in [
            (302, "(302) server moved temporarily"),
            (404, "(404) not found"),
            (503, "(503) server unavailable"),
            (999, "(999) an error occurred"),
        ] {
            let (logs, _guard) = CapturedLogs::install();
            decode(&FeedResponse::new(code, String::new()));

            let errors = logs.errors();
            assert_eq!(errors.len(), 1, "status {code}");
            assert!(errors[0].contains(message), "{}", errors[0]);
            assert!(errors[0].contains(&format!("status={code}")), "{}", errors[0]);
        }
    }

    #[test]
    fn ok_status_logs_no_error() {
        let (logs, _guard) = CapturedLogs::install();
        decode(&FeedResponse::new(200, format!("{HEADER}\n1,a-b,1,0,2,x,y\n")));
        assert!(logs.errors().is_empty());
    }

    #[test]
    fn decodes_rows_in_order() {
        let body = format!(
            "{HEADER}\n1,10-Centro-Main,-23.5,1,-46.6,x,y\n2,10-Centro-Main,-23.5,0,-46.6,x,y\n"
        );
        let rows = decode(&FeedResponse::new(200, body));

        assert_eq!(rows.len(), 2);
        assert_eq!(
            fields(&rows[0]),
            ["1", "10-Centro-Main", "-23.5", "1", "-46.6", "x", "y"]
        );
        assert_eq!(rows[1].order(), "2");
        assert_eq!(rows[1].marker(), "0");
    }

    #[test]
    fn strips_quotes_and_carriage_returns() {
        let body = "\"id\",\"desc\"\r\n\"1\",\"10-Centro\",\"-23.5\",\"0\",\"-46.6\",\"x\",\"y\"\r\n";
        let rows = decode_body(body);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            fields(&rows[0]),
            ["1", "10-Centro", "-23.5", "0", "-46.6", "x", "y"]
        );
    }

    #[test]
    fn skips_blank_lines() {
        let body = format!("{HEADER}\n\n1,a-b,1,0,2,x,y\n\n\n2,a-c,1,1,2,x,y");
        let rows = decode_body(&body);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order(), "1");
        assert_eq!(rows[1].order(), "2");
    }

    #[test]
    fn skips_malformed_rows_only() {
        let body = format!("{HEADER}\n1,a-b,1,0,2,x,y\n2,short\n3,a-b,1,1,2,x,y,extra\n4,a-c,1,1,2,x,y\n");
        let rows = decode_body(&body);

        let orders: Vec<&str> = rows.iter().map(RawRow::order).collect();
        assert_eq!(orders, ["1", "4"]);
    }

    #[test]
    fn header_only_body_is_empty() {
        assert!(decode_body(HEADER).is_empty());
        assert!(decode_body(&format!("{HEADER}\n")).is_empty());
        assert!(decode_body("").is_empty());
    }

    #[test]
    fn empty_fields_are_kept() {
        let rows = decode_body(&format!("{HEADER}\n,,,,,,\n"));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].0.iter().all(String::is_empty));
    }

    fn field() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ._-]{0,10}"
    }

    fn row() -> impl Strategy<Value = RawRow> {
        proptest::collection::vec(field(), ROW_FIELDS)
            .prop_map(|fields| RawRow::from_fields(fields).unwrap())
    }

    proptest! {
        /// Encoding rows as a feed body and decoding gives the rows back
        #[test]
        fn decode_roundtrip(rows in proptest::collection::vec(row(), 0..20)) {
            let mut body = String::from(HEADER);
            for row in &rows {
                body.push('\n');
                body.push_str(&row.0.join(","));
            }

            let decoded = decode(&FeedResponse::new(200, body));
            prop_assert_eq!(decoded, rows);
        }
    }
}
