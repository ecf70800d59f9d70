//
//  mediawiki-butt
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Scripted in-memory transport for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::common::ApiResult;
use super::params::Params;
use super::transport::{RawResponse, Transport};

type Responder = Box<dyn Fn(&Params) -> Value + Send + Sync>;

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub params: Params,
    pub user_agent: String,
}

/// Shared view of every request the mock received, in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Params) -> bool) -> usize {
        self.0.lock().iter().filter(|c| predicate(&c.params)).count()
    }

    /// The last request for the given `action`.
    pub fn find(&self, action: &str) -> Option<Params> {
        self.0
            .lock()
            .iter()
            .rev()
            .find(|c| c.params.action_name() == Some(action))
            .map(|c| c.params.clone())
    }
}

/// Answers every request by calling a closure with the parameters.
pub(crate) struct MockTransport {
    responder: Responder,
    log: CallLog,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&Params) -> Value + Send + Sync + 'static) -> (Self, CallLog) {
        let log = CallLog::default();
        let transport = Self {
            responder: Box::new(responder),
            log: log.clone(),
        };
        (transport, log)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_raw(&self, params: &Params, user_agent: &str) -> ApiResult<RawResponse> {
        self.log.0.lock().push(Call {
            params: params.clone(),
            user_agent: user_agent.to_string(),
        });
        let reply = (self.responder)(params);
        Ok(RawResponse {
            status: 200,
            body: reply.to_string(),
        })
    }
}
