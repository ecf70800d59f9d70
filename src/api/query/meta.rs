//
//  mediawiki-butt
//  api/query/meta.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User information: `meta=userinfo` and `list=users`.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::api::common::{ApiError, ApiResult};
use crate::api::params::Params;
use crate::api::response::{query_section, value_to_string};
use crate::api::WikiClient;
use crate::auth::BOT_GROUP;

fn groups_of(value: Option<&Value>) -> ApiResult<BTreeSet<String>> {
    match value {
        None => Ok(BTreeSet::new()),
        Some(Value::Array(groups)) => groups.iter().map(value_to_string).collect(),
        Some(_) => Err(ApiError::malformed("`groups` is not a list")),
    }
}

impl WikiClient {
    /// Groups of the account this client is acting as.
    ///
    /// Anonymous sessions typically report only `*`.
    pub async fn current_user_groups(&self) -> ApiResult<BTreeSet<String>> {
        let params = Params::query().set("meta", "userinfo").set("uiprop", "groups");
        let reply = self.request(params).await?;

        let info = query_section(&reply)?
            .get("userinfo")
            .and_then(Value::as_object)
            .ok_or_else(|| ApiError::malformed("missing `query.userinfo`"))?;
        groups_of(info.get("groups"))
    }

    /// Groups of the named user, or `None` when the user does not exist.
    pub async fn user_groups(&self, name: &str) -> ApiResult<Option<BTreeSet<String>>> {
        let params = Params::query()
            .set("list", "users")
            .require("ususers", name)?
            .set("usprop", "groups");
        let reply = self.request(params).await?;

        let user = query_section(&reply)?
            .get("users")
            .and_then(Value::as_array)
            .and_then(|users| users.first())
            .and_then(Value::as_object)
            .ok_or_else(|| ApiError::malformed("missing `query.users`"))?;

        if user.contains_key("missing") || user.contains_key("invalid") {
            return Ok(None);
        }
        groups_of(user.get("groups")).map(Some)
    }

    /// Whether the named user is in the `bot` group. Unknown users are not bots.
    pub async fn is_user_bot(&self, name: &str) -> ApiResult<bool> {
        Ok(self
            .user_groups(name)
            .await?
            .is_some_and(|groups| groups.contains(BOT_GROUP)))
    }
}
