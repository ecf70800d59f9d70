//
//  mediawiki-butt
//  api/query/lists.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! `list=` query modules that enumerate wiki-wide collections.
//!
//! Every method here follows the same recipe: build the parameters, clamp the
//! limit to the session's tier, fetch with a fixed [`Shape`], and convert.
//!
//! | Method | Module | Prefix | Extracted |
//! |--------|--------|--------|-----------|
//! | [`all_categories`](WikiClient::all_categories) | `allcategories` | `ac` | `*` |
//! | [`all_images`](WikiClient::all_images) | `allimages` | `ai` | `name` |
//! | [`all_pages_in_namespace`](WikiClient::all_pages_in_namespace) | `allpages` | `ap` | `title` |
//! | [`all_users`](WikiClient::all_users) | `allusers` | `au` | `name -> userid` |
//! | [`all_blocks`](WikiClient::all_blocks) | `blocks` | `bk` | `id` |
//! | [`all_transcluders`](WikiClient::all_transcluders) | `embeddedin` | `ei` | `title` |
//! | [`all_deleted_files`](WikiClient::all_deleted_files) | `filearchive` | `fa` | `name` |
//! | [`all_protected_titles`](WikiClient::all_protected_titles) | `protectedtitles` | `pt` | `title` |
//! | [`random_pages`](WikiClient::random_pages) | `random` | `rn` | `title` |
//! | [`tags`](WikiClient::tags) | `tags` | `tg` | `name` |

use std::collections::BTreeMap;

use crate::api::common::ApiResult;
use crate::api::limits::LimitCaps;
use crate::api::params::Params;
use crate::api::response::Shape;
use crate::api::WikiClient;
use crate::constants::{is_known_namespace, MAIN_NAMESPACE};

/// Default requested result count for list queries.
pub const DEFAULT_LIMIT: i64 = 500;

impl WikiClient {
    fn list_params(&self, list: &str, prefix: &str, limit: i64, caps: LimitCaps) -> ApiResult<Params> {
        let limit = self.limit(limit, caps)?;
        Ok(Params::query()
            .set("list", list)
            .set(&format!("{}limit", prefix), limit))
    }

    /// All category names on the wiki.
    pub async fn all_categories(&self, limit: i64) -> ApiResult<Vec<String>> {
        let params = self.list_params("allcategories", "ac", limit, LimitCaps::DEFAULT)?;
        self.fetch(params, Shape::List { list: "allcategories", field: "*" })
            .await?
            .into_strings()
    }

    /// All file names on the wiki, without the `File:` prefix.
    pub async fn all_images(&self, limit: i64) -> ApiResult<Vec<String>> {
        let params = self.list_params("allimages", "ai", limit, LimitCaps::DEFAULT)?;
        self.fetch(params, Shape::List { list: "allimages", field: "name" })
            .await?
            .into_strings()
    }

    /// All page titles in a namespace.
    pub async fn all_pages_in_namespace(&self, namespace: i32, limit: i64) -> ApiResult<Vec<String>> {
        let params = self
            .list_params("allpages", "ap", limit, LimitCaps::DEFAULT)?
            .set("apnamespace", namespace);
        self.fetch(params, Shape::List { list: "allpages", field: "title" })
            .await?
            .into_strings()
    }

    /// All users, or the members of `group`, as `name -> user id`.
    pub async fn all_users(&self, group: Option<&str>, limit: i64) -> ApiResult<BTreeMap<String, u64>> {
        let params = self
            .list_params("allusers", "au", limit, LimitCaps::DEFAULT)?
            .set_opt("augroup", group);
        self.fetch(
            params,
            Shape::Map {
                list: "allusers",
                key: "name",
                value: "userid",
            },
        )
        .await?
        .into_id_map()
    }

    /// Ids of the active blocks.
    pub async fn all_blocks(&self, limit: i64) -> ApiResult<Vec<u64>> {
        let params = self
            .list_params("blocks", "bk", limit, LimitCaps::DEFAULT)?
            .set("bkprop", "id");
        self.fetch(params, Shape::List { list: "blocks", field: "id" })
            .await?
            .into_ids()
    }

    /// Titles of the pages that transclude `page`.
    pub async fn all_transcluders(&self, page: &str, limit: i64) -> ApiResult<Vec<String>> {
        let params = self
            .list_params("embeddedin", "ei", limit, LimitCaps::DEFAULT)?
            .require("eititle", page)?;
        self.fetch(params, Shape::List { list: "embeddedin", field: "title" })
            .await?
            .into_strings()
    }

    /// Names of deleted or archived files.
    ///
    /// Requires the `deletedhistory` right.
    pub async fn all_deleted_files(&self, limit: i64) -> ApiResult<Vec<String>> {
        let params = self.list_params("filearchive", "fa", limit, LimitCaps::DEFAULT)?;
        self.fetch(params, Shape::List { list: "filearchive", field: "name" })
            .await?
            .into_strings()
    }

    /// Titles protected from creation, optionally only at `level` (e.g. `sysop`).
    pub async fn all_protected_titles(&self, level: Option<&str>, limit: i64) -> ApiResult<Vec<String>> {
        let params = self
            .list_params("protectedtitles", "pt", limit, LimitCaps::DEFAULT)?
            .set_opt("ptlevel", level);
        self.fetch(params, Shape::List { list: "protectedtitles", field: "title" })
            .await?
            .into_strings()
    }

    /// Random page titles.
    ///
    /// At most 10 per call for normal users and 20 for bots. Namespaces that
    /// are not in [`NAMESPACES`](crate::constants::NAMESPACES) fall back to the
    /// main namespace.
    pub async fn random_pages(&self, count: i64, namespace: i32) -> ApiResult<Vec<String>> {
        let namespace = if is_known_namespace(namespace) {
            namespace
        } else {
            tracing::debug!("Unknown namespace {}, using main namespace", namespace);
            MAIN_NAMESPACE
        };
        let params = self
            .list_params("random", "rn", count, LimitCaps::RANDOM)?
            .set("rnnamespace", namespace);
        self.fetch(params, Shape::List { list: "random", field: "title" })
            .await?
            .into_strings()
    }

    /// Names of the change tags defined on the wiki.
    pub async fn tags(&self, limit: i64) -> ApiResult<Vec<String>> {
        let params = self.list_params("tags", "tg", limit, LimitCaps::DEFAULT)?;
        self.fetch(params, Shape::List { list: "tags", field: "name" })
            .await?
            .into_strings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ApiError;
    use crate::api::testing::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_all_users_builds_map() {
        let (transport, log) = MockTransport::new(|_| {
            json!({"query": {"allusers": [
                {"name": "Alice", "userid": 1},
                {"name": "Bob", "userid": 2}
            ]}})
        });
        let client = WikiClient::with_transport(transport, None);

        let users = client.all_users(None, 10).await.unwrap();

        let expected: BTreeMap<String, u64> =
            [("Alice".to_string(), 1), ("Bob".to_string(), 2)].into_iter().collect();
        assert_eq!(users, expected);

        let sent = log.find("query").unwrap();
        assert_eq!(sent.get("list"), Some("allusers"));
        assert_eq!(sent.get("aulimit"), Some("10"));
        assert!(!sent.contains("augroup"));
    }

    #[tokio::test]
    async fn test_all_users_with_group() {
        let (transport, log) = MockTransport::new(|_| json!({"query": {"allusers": []}}));
        let client = WikiClient::with_transport(transport, None);

        let users = client.all_users(Some("sysop"), 50).await.unwrap();
        assert!(users.is_empty());
        assert_eq!(log.find("query").unwrap().get("augroup"), Some("sysop"));
    }

    #[tokio::test]
    async fn test_tags_clamped_to_user_cap() {
        let (transport, log) = MockTransport::new(|_| {
            json!({"query": {"tags": [{"name": "mobile edit"}, {"name": "mw-reverted"}]}})
        });
        let client = WikiClient::with_transport(transport, None);

        let tags = client.tags(10_000).await.unwrap();

        assert_eq!(tags, vec!["mobile edit", "mw-reverted"]);
        assert_eq!(log.find("query").unwrap().get("tglimit"), Some("500"));
    }

    #[tokio::test]
    async fn test_invalid_limit_sends_nothing() {
        let (transport, log) = MockTransport::new(|_| json!({}));
        let client = WikiClient::with_transport(transport, None);

        let err = client.all_images(0).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn test_categories_use_star_field() {
        let (transport, _log) = MockTransport::new(|_| {
            json!({"query": {"allcategories": [{"*": "Animals"}, {"*": "Plants"}]}})
        });
        let client = WikiClient::with_transport(transport, None);

        assert_eq!(
            client.all_categories(DEFAULT_LIMIT).await.unwrap(),
            vec!["Animals", "Plants"]
        );
    }

    #[tokio::test]
    async fn test_blocks_are_ids() {
        let (transport, log) = MockTransport::new(|_| {
            json!({"query": {"blocks": [{"id": 17}, {"id": 4}]}})
        });
        let client = WikiClient::with_transport(transport, None);

        assert_eq!(client.all_blocks(5).await.unwrap(), vec![17, 4]);
        assert_eq!(log.find("query").unwrap().get("bkprop"), Some("id"));
    }

    #[tokio::test]
    async fn test_random_pages_caps_and_namespace() {
        let (transport, log) = MockTransport::new(|_| {
            json!({"query": {"random": [{"id": 9, "ns": 0, "title": "Kiwi"}]}})
        });
        let client = WikiClient::with_transport(transport, None);

        let pages = client.random_pages(50, 4242).await.unwrap();
        assert_eq!(pages, vec!["Kiwi"]);

        let sent = log.find("query").unwrap();
        assert_eq!(sent.get("rnlimit"), Some("10"));
        assert_eq!(sent.get("rnnamespace"), Some("0"));

        client.random_pages(3, 10).await.unwrap();
        let sent = log.find("query").unwrap();
        assert_eq!(sent.get("rnlimit"), Some("3"));
        assert_eq!(sent.get("rnnamespace"), Some("10"));
    }

    #[tokio::test]
    async fn test_transcluders_require_page() {
        let (transport, log) = MockTransport::new(|_| json!({}));
        let client = WikiClient::with_transport(transport, None);

        assert!(matches!(
            client.all_transcluders("", 10).await,
            Err(ApiError::InvalidArgument(_))
        ));
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_surfaces() {
        let (transport, _log) = MockTransport::new(|_| {
            json!({"error": {"code": "famissingrights", "info": "no"}, "query": {"filearchive": []}})
        });
        let client = WikiClient::with_transport(transport, None);

        let err = client.all_deleted_files(10).await.unwrap_err();
        assert_eq!(err.code(), Some("famissingrights"));
    }
}
