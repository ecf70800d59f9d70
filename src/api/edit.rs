//
//  mediawiki-butt
//  api/edit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Page edits (`action=edit`).

use serde::Serialize;
use serde_json::Value;

use crate::api::common::{ApiError, ApiResult, RemoteError};
use crate::api::params::Params;
use crate::api::response::{value_to_string, value_to_u64};
use crate::api::WikiClient;
use crate::auth::TokenKind;

/// Parameters for [`WikiClient::edit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRequest {
    pub title: String,
    /// The complete new page text.
    pub text: String,
    pub summary: Option<String>,
    pub minor: bool,
    /// Mark the edit as a bot edit. Ignored by the wiki unless the account
    /// has the `bot` right.
    pub bot: bool,
    /// Fail with `articleexists` if the page already exists.
    pub create_only: bool,
    /// Fail with `missingtitle` if the page does not exist.
    pub no_create: bool,
}

impl EditRequest {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn minor(mut self, enabled: bool) -> Self {
        self.minor = enabled;
        self
    }

    pub fn bot(mut self, enabled: bool) -> Self {
        self.bot = enabled;
        self
    }

    pub fn create_only(mut self, enabled: bool) -> Self {
        self.create_only = enabled;
        self
    }

    pub fn no_create(mut self, enabled: bool) -> Self {
        self.no_create = enabled;
        self
    }

    fn to_params(&self) -> ApiResult<Params> {
        if self.create_only && self.no_create {
            return Err(ApiError::InvalidArgument(
                "`createonly` and `nocreate` are mutually exclusive".to_string(),
            ));
        }
        // Empty text is a valid edit (blanking), so only the title is required.
        Ok(Params::action("edit")
            .require("title", &self.title)?
            .set("text", &self.text)
            .set_opt("summary", self.summary.as_deref())
            .flag("minor", self.minor)
            .flag("bot", self.bot)
            .flag("createonly", self.create_only)
            .flag("nocreate", self.no_create))
    }
}

/// What the wiki did with an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    /// `edit.result`, always `Success` for a returned outcome.
    pub result: String,
    pub page_id: u64,
    pub title: String,
    /// The new revision. `None` when the text was unchanged.
    pub new_revid: Option<u64>,
    /// The wiki treated the edit as a null edit.
    pub no_change: bool,
}

impl EditOutcome {
    fn from_reply(reply: &Value) -> ApiResult<Self> {
        let edit = reply
            .get("edit")
            .and_then(Value::as_object)
            .ok_or_else(|| ApiError::malformed("missing `edit` object"))?;

        let result = edit
            .get("result")
            .map(value_to_string)
            .transpose()?
            .ok_or_else(|| ApiError::malformed("missing `edit.result`"))?;

        // Captchas and abuse filters answer with a non-success result rather
        // than an error envelope.
        if result != "Success" {
            let info = edit
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ApiError::Remote(RemoteError {
                code: result.to_lowercase(),
                info,
            }));
        }

        Ok(Self {
            result,
            page_id: edit
                .get("pageid")
                .map(value_to_u64)
                .transpose()?
                .unwrap_or_default(),
            title: edit
                .get("title")
                .map(value_to_string)
                .transpose()?
                .unwrap_or_default(),
            new_revid: edit.get("newrevid").map(value_to_u64).transpose()?,
            no_change: edit.contains_key("nochange"),
        })
    }
}

impl WikiClient {
    /// Replaces the text of a page, creating it if needed.
    pub async fn edit(&self, request: &EditRequest) -> ApiResult<EditOutcome> {
        let params = request.to_params()?;
        let reply = self.write(params, TokenKind::Csrf).await?;
        let outcome = EditOutcome::from_reply(&reply)?;
        tracing::debug!("Edited {} (revision {:?})", outcome.title, outcome.new_revid);
        Ok(outcome)
    }
}
