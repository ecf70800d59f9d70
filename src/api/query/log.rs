//
//  mediawiki-butt
//  api/query/log.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Log events (`list=logevents`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::common::ApiResult;
use crate::api::limits::LimitCaps;
use crate::api::params::Params;
use crate::api::response::{format_timestamp, parse_timestamp, required, value_to_string, value_to_u64, Shape};
use crate::api::WikiClient;

/// `leaction` for page deletions.
pub const DELETE_ACTION: &str = "delete/delete";

/// `leaction` for page restorations.
pub const RESTORE_ACTION: &str = "delete/restore";

/// One entry of a log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    /// The log id.
    pub id: u64,
    /// The affected page.
    pub title: String,
    /// Who performed the action.
    pub user: String,
    /// The edit summary. `None` when the comment is hidden or absent.
    pub comment: Option<String>,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Builds an event from one entry of `query.logevents`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponse`](crate::ApiError::MalformedResponse) when
    /// a required field is missing or the timestamp cannot be parsed.
    pub fn from_record(record: &Map<String, Value>) -> ApiResult<Self> {
        let timestamp = value_to_string(required(record, "timestamp")?)?;
        Ok(Self {
            id: value_to_u64(required(record, "logid")?)?,
            title: value_to_string(required(record, "title")?)?,
            user: value_to_string(required(record, "user")?)?,
            comment: record.get("comment").and_then(Value::as_str).map(str::to_string),
            timestamp: parse_timestamp(&timestamp)?,
        })
    }
}

/// Optional filters for log queries.
///
/// `start` and `end` follow the API's default direction (newest first), so
/// `start` is the later of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    pub user: Option<String>,
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            user: None,
            title: None,
            start: None,
            end: None,
            limit: 500,
        }
    }
}

impl WikiClient {
    /// Log events of one `type/action` pair, newest first.
    pub async fn log_events(&self, action: &str, filter: &LogFilter) -> ApiResult<Vec<LogEvent>> {
        let limit = self.limit(filter.limit, LimitCaps::DEFAULT)?;
        let params = Params::query()
            .set("list", "logevents")
            .require("leaction", action)?
            .set_opt("leuser", filter.user.as_deref())
            .set_opt("letitle", filter.title.as_deref())
            .set_opt("lestart", filter.start.as_ref().map(format_timestamp))
            .set_opt("leend", filter.end.as_ref().map(format_timestamp))
            .set("lelimit", limit);

        self.fetch(params, Shape::Records { list: "logevents" })
            .await?
            .into_records()?
            .iter()
            .map(LogEvent::from_record)
            .collect()
    }

    /// Page deletions.
    pub async fn delete_log(&self, filter: &LogFilter) -> ApiResult<Vec<LogEvent>> {
        self.log_events(DELETE_ACTION, filter).await
    }

    /// Page restorations (undeletions).
    pub async fn restore_log(&self, filter: &LogFilter) -> ApiResult<Vec<LogEvent>> {
        self.log_events(RESTORE_ACTION, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ApiError;
    use crate::api::testing::MockTransport;
    use chrono::TimeZone;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_log_parses_events() {
        let (transport, log) = MockTransport::new(|_| {
            json!({"query": {"logevents": [{
                "logid": 5,
                "title": "X",
                "user": "Y",
                "comment": "",
                "timestamp": "2020-01-01T00:00:00Z"
            }]}})
        });
        let client = WikiClient::with_transport(transport, None);

        let events = client.delete_log(&LogFilter::default()).await.unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, 5);
        assert_eq!(event.title, "X");
        assert_eq!(event.user, "Y");
        assert_eq!(event.comment.as_deref(), Some(""));
        assert_eq!(event.timestamp, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let sent = log.find("query").unwrap();
        assert_eq!(sent.get("leaction"), Some("delete/delete"));
        assert_eq!(sent.get("lelimit"), Some("500"));
        assert!(!sent.contains("leuser"));
    }

    #[tokio::test]
    async fn test_restore_log_sends_filters() {
        let (transport, log) = MockTransport::new(|_| json!({"query": {"logevents": []}}));
        let client = WikiClient::with_transport(transport, None);

        let filter = LogFilter {
            user: Some("Admin".to_string()),
            title: Some("Main Page".to_string()),
            start: Some(Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap()),
            end: None,
            limit: 25,
        };
        let events = client.restore_log(&filter).await.unwrap();
        assert!(events.is_empty());

        let sent = log.find("query").unwrap();
        assert_eq!(sent.get("leaction"), Some("delete/restore"));
        assert_eq!(sent.get("leuser"), Some("Admin"));
        assert_eq!(sent.get("letitle"), Some("Main Page"));
        assert_eq!(sent.get("lestart"), Some("2021-06-01T12:00:00Z"));
        assert!(!sent.contains("leend"));
        assert_eq!(sent.get("lelimit"), Some("25"));
    }

    #[tokio::test]
    async fn test_bad_timestamp_is_malformed() {
        let (transport, _log) = MockTransport::new(|_| {
            json!({"query": {"logevents": [{
                "logid": 1, "title": "X", "user": "Y", "timestamp": "yesterday"
            }]}})
        });
        let client = WikiClient::with_transport(transport, None);

        assert!(matches!(
            client.delete_log(&LogFilter::default()).await,
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_hidden_comment_is_none() {
        let record = json!({
            "logid": 9, "title": "X", "user": "Y",
            "commenthidden": "", "timestamp": "2022-03-04T05:06:07Z"
        });
        let event = LogEvent::from_record(record.as_object().unwrap()).unwrap();
        assert_eq!(event.comment, None);
    }
}
