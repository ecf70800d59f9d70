//
//  mediawiki-butt
//  api/query/properties.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Page properties (`prop=`).

use serde::Serialize;
use serde_json::Value;

use crate::api::common::{ApiError, ApiResult};
use crate::api::limits::LimitCaps;
use crate::api::params::Params;
use crate::api::response::{value_to_string, value_to_u64, Shape};
use crate::api::WikiClient;

/// Field holding the number of anonymous contributors.
const ANON_CONTRIBUTORS_KEY: &str = "anoncontributors";

/// Who contributed to a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contributors {
    /// Usernames of logged-in contributors, in API order.
    pub names: Vec<String>,
    /// Number of distinct anonymous (IP) contributors.
    pub anonymous: u64,
}

impl Contributors {
    /// Logged-in plus anonymous contributors.
    pub fn total(&self) -> u64 {
        self.names.len() as u64 + self.anonymous
    }
}

impl WikiClient {
    /// Contributors to `title`, or `None` when the page does not exist.
    ///
    /// A page that exists but has no registered contributors yields an empty
    /// `names` list, not `None`.
    pub async fn contributors(&self, title: &str, limit: i64) -> ApiResult<Option<Contributors>> {
        let limit = self.limit(limit, LimitCaps::DEFAULT)?;
        let params = Params::query()
            .set("prop", "contributors")
            .require("titles", title)?
            .set("pclimit", limit);

        let Some(page) = self.fetch(params, Shape::Page).await?.into_page()? else {
            return Ok(None);
        };

        let names = match page.get("contributors") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|c| {
                    c.get("name")
                        .ok_or_else(|| ApiError::malformed("contributor without `name`"))
                        .and_then(value_to_string)
                })
                .collect::<ApiResult<_>>()?,
            Some(_) => return Err(ApiError::malformed("`contributors` is not a list")),
        };
        let anonymous = page
            .get(ANON_CONTRIBUTORS_KEY)
            .map(value_to_u64)
            .transpose()?
            .unwrap_or(0);

        Ok(Some(Contributors { names, anonymous }))
    }

    /// Usernames of the logged-in contributors to `title`.
    pub async fn logged_in_contributors(&self, title: &str, limit: i64) -> ApiResult<Option<Vec<String>>> {
        Ok(self.contributors(title, limit).await?.map(|c| c.names))
    }

    /// Number of anonymous contributors to `title`.
    pub async fn anonymous_contributors_count(&self, title: &str, limit: i64) -> ApiResult<Option<u64>> {
        Ok(self.contributors(title, limit).await?.map(|c| c.anonymous))
    }

    /// Total number of contributors to `title`.
    pub async fn total_contributors(&self, title: &str, limit: i64) -> ApiResult<Option<u64>> {
        Ok(self.contributors(title, limit).await?.map(|c| c.total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use serde_json::json;

    fn page_reply() -> Value {
        json!({"query": {"pages": {"736": {
            "pageid": 736,
            "ns": 0,
            "title": "Albert Einstein",
            "anoncontributors": 3,
            "contributors": [
                {"userid": 1, "name": "Alice"},
                {"userid": 2, "name": "Bob"}
            ]
        }}}})
    }

    #[tokio::test]
    async fn test_contributors_found() {
        let (transport, log) = MockTransport::new(|_| page_reply());
        let client = WikiClient::with_transport(transport, None);

        let names = client
            .logged_in_contributors("Albert Einstein", 500)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names, vec!["Alice", "Bob"]);

        assert_eq!(
            client.anonymous_contributors_count("Albert Einstein", 500).await.unwrap(),
            Some(3)
        );
        assert_eq!(
            client.total_contributors("Albert Einstein", 500).await.unwrap(),
            Some(5)
        );

        let sent = log.find("query").unwrap();
        assert_eq!(sent.get("prop"), Some("contributors"));
        assert_eq!(sent.get("titles"), Some("Albert Einstein"));
        assert_eq!(sent.get("pclimit"), Some("500"));
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let (transport, _log) = MockTransport::new(|_| {
            json!({"query": {"pages": {"-1": {"ns": 0, "title": "No Such Page", "missing": ""}}}})
        });
        let client = WikiClient::with_transport(transport, None);

        assert_eq!(
            client.logged_in_contributors("No Such Page", 10).await.unwrap(),
            None
        );
        assert_eq!(
            client.anonymous_contributors_count("No Such Page", 10).await.unwrap(),
            None
        );
        assert_eq!(client.total_contributors("No Such Page", 10).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_existing_page_without_contributors() {
        let (transport, _log) = MockTransport::new(|_| {
            json!({"query": {"pages": {"12": {"pageid": 12, "ns": 0, "title": "Quiet"}}}})
        });
        let client = WikiClient::with_transport(transport, None);

        let found = client.contributors("Quiet", 10).await.unwrap();
        assert_eq!(found, Some(Contributors::default()));
    }
}
