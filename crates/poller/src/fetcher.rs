//! Status API client.
//!
//! Issues `GET <endpoint>?from_date=<cursor>` with an `OAuth` authorization
//! header and decodes the body into a [`FetchResponse`]. Retrying is left to
//! the caller.

use std::future::Future;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use herald_common::config::AppConfig;
use herald_common::error::FetchError;
use herald_common::types::{FetchResponse, PollCursor, RequestParams, SubmissionRecord};

/// Source of submission review statuses.
pub trait StatusSource {
    /// Fetch submissions updated at or after `cursor`.
    fn fetch(
        &self,
        cursor: PollCursor,
    ) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send;
}

/// HTTP client for the review-tracking API.
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.practicum_endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: PollCursor) -> Result<FetchResponse, FetchError> {
        let params = RequestParams {
            from_date: cursor.timestamp(),
        };

        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&params)
            .send()
            .await
            .map_err(|source| FetchError::Connection { params, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Connection { params, source })?;

        tracing::debug!(
            %status,
            from_date = params.from_date,
            bytes = body.len(),
            "Status API responded"
        );

        decode_payload(&body, params)
    }
}

/// Decode a status API body.
///
/// Error-shaped objects (carrying `code` or `error`) become
/// [`FetchError::Upstream`]; anything else that is not a `homeworks` listing
/// becomes [`FetchError::Malformed`].
pub fn decode_payload(body: &str, params: RequestParams) -> Result<FetchResponse, FetchError> {
    let malformed = |reason: String| FetchError::Malformed { reason, params };

    let value: Value =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    let Value::Object(mut object) = value else {
        return Err(malformed("expected a JSON object".to_string()));
    };

    // Presence of the key marks an error payload, whatever its value.
    let indicator = ["code", "error"].iter().find_map(|key| object.get(*key));

    if let Some(indicator) = indicator {
        return Err(FetchError::Upstream {
            indicator: indicator_text(indicator),
            message: object
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            params,
        });
    }

    let homeworks = object
        .remove("homeworks")
        .ok_or_else(|| malformed("unexpected response: missing `homeworks`".to_string()))?;

    let submissions: Vec<SubmissionRecord> = serde_json::from_value(homeworks)
        .map_err(|e| malformed(format!("invalid `homeworks`: {e}")))?;

    let next_cursor = match object.remove("current_date") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_u64()
                .ok_or_else(|| malformed(format!("invalid `current_date`: {v}")))?,
        ),
    };

    Ok(FetchResponse {
        submissions,
        next_cursor,
    })
}

fn indicator_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
