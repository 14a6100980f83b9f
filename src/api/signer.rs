//! Request construction and signing.
//!
//! The crawler only ever asks for "page N of feed F of blog B". Everything
//! that turns that into a concrete HTTP request (endpoint, credentials,
//! client-identification headers) lives behind [`RequestSigner`].

use reqwest::{header, Client, Request};
use url::Url;

use crate::config::{Config, FeedKind};
use crate::error::Result;

/// Number of posts requested per page.
pub const PAGE_SIZE: u32 = 20;

/// A logical request for one page of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub kind: FeedKind,
    pub handle: String,
    pub offset: u32,
    pub limit: u32,
}

impl FeedRequest {
    pub fn new(kind: FeedKind, handle: impl Into<String>, offset: u32) -> Self {
        Self {
            kind,
            handle: handle.into(),
            offset,
            limit: PAGE_SIZE,
        }
    }
}

/// Turns a [`FeedRequest`] into a ready-to-send HTTP request.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, client: &Client, request: &FeedRequest) -> Result<Request>;
}

/// Signs requests with an API key in the query string and the mobile
/// client's identification headers.
#[derive(Debug, Clone)]
pub struct ApiKeySigner {
    base_url: Url,
    api_key: String,
    user_agent: String,
}

impl ApiKeySigner {
    pub fn new(base_url: &str, api_key: String, user_agent: String) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key,
            user_agent,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api.base_url,
            config.account.api_key.clone(),
            config.account.user_agent.clone(),
        )
    }

    /// Endpoint URL for a request, query string included.
    pub fn endpoint(&self, request: &FeedRequest) -> Result<Url> {
        let path = format!(
            "/v2/blog/{}.tumblr.com/{}",
            request.handle,
            request.kind.path_segment()
        );
        let mut url = self.base_url.join(&path)?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("limit", &request.limit.to_string())
            .append_pair("offset", &request.offset.to_string())
            .append_pair("reblog_info", "true");
        Ok(url)
    }
}

impl RequestSigner for ApiKeySigner {
    fn sign(&self, client: &Client, request: &FeedRequest) -> Result<Request> {
        let url = self.endpoint(request)?;

        let built = client
            .get(url)
            .header(header::ACCEPT, "*/*")
            .header("x-s-id-enabled", "true")
            .header(
                "x-yuser-agent",
                "YMobile/1.0 (com.tumblr.tumblr/11.7.1; iOS/11.3.1;; iPhone8,1; Apple;;; 1334x750;)",
            )
            .header("x-version", "iPhone/11.7.1/117100/11.3.1/tumblr")
            .header("di", "DI/1.0 (262; 02; [WIFI])")
            .header(header::USER_AGENT, &self.user_agent)
            .build()?;

        Ok(built)
    }
}
