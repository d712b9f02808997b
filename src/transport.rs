//! HTTP execution shared by every resource client: URL building, the dual
//! bearer headers, error decoding, and transparent deferred-task resolution.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::{ClientError, Result};
use crate::resources::tasks::{Task, TaskStatus, task_path, task_result_path};

/// Maximum number of body characters quoted in decode-failure logs.
const LOG_BODY_LIMIT: usize = 512;

/// Join a base URL and a relative path under the fixed API version.
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/v1/{}", base_url.trim_end_matches('/'), path)
}

fn truncated(text: &str) -> &str {
    match text.char_indices().nth(LOG_BODY_LIMIT) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

fn decode_json<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| {
        let text = String::from_utf8_lossy(body);
        log::error!("{url}: undecodable response body ({err}): {}", truncated(&text));
        ClientError::Decode {
            detail: err.to_string(),
            body: text.into_owned(),
        }
    })
}

#[derive(Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    user_agent: String,
    task_poll: RetryPolicy,
}

impl Transport {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: String,
        access_token: String,
        config: &ClientConfig,
    ) -> Self {
        Self {
            http,
            base_url,
            access_token,
            user_agent: config.user_agent.clone(),
            task_poll: config.task_poll,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    /// `GET` a path and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (url, body) = self.run(Method::GET, path, None::<&()>).await?;
        decode_json(&url, &body)
    }

    /// `GET` a path and return the raw body.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let (_, body) = self.run(Method::GET, path, None::<&()>).await?;
        Ok(body)
    }

    /// `POST` a JSON payload, discarding any response body.
    pub(crate) async fn post(&self, path: &str, payload: &impl Serialize) -> Result<()> {
        self.run(Method::POST, path, Some(payload)).await?;
        Ok(())
    }

    /// `PUT` a JSON payload, discarding any response body.
    pub(crate) async fn put(&self, path: &str, payload: &impl Serialize) -> Result<()> {
        self.run(Method::PUT, path, Some(payload)).await?;
        Ok(())
    }

    /// `DELETE` a path, discarding any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.run(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// One request, start to finish: encode, send, resolve deferral, decode
    /// errors. Returns the final URL and body so callers can attribute decode
    /// failures. Exactly one round trip unless a `202` starts task polling;
    /// no retries happen at this layer.
    async fn run(
        &self,
        method: Method,
        path: &str,
        payload: Option<&impl Serialize>,
    ) -> Result<(String, Vec<u8>)> {
        let url = self.endpoint(path);
        let body = match payload {
            Some(payload) => {
                Some(serde_json::to_vec(payload).map_err(|err| ClientError::Encode {
                    detail: err.to_string(),
                })?)
            }
            None => None,
        };

        let (status, task_id, bytes) = self.dispatch(method.clone(), &url, body).await?;

        let (status, url, bytes) = match task_id {
            Some(task_id) if status == StatusCode::ACCEPTED => {
                log::debug!("{method} {url}: deferred to task {task_id}");
                self.resolve_deferred(&task_id).await?
            }
            _ => (status, url, bytes),
        };

        if !status.is_success() {
            return Err(ClientError::api(
                status.as_u16(),
                method.as_str(),
                &url,
                &bytes,
            ));
        }
        Ok((url, bytes))
    }

    /// A single round trip: attach headers, send, drain the body once.
    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Option<String>, Vec<u8>)> {
        log::debug!("{method} {url}");
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header("Token", format!("Bearer {}", self.access_token));
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let task_id = response
            .headers()
            .get("X-Task-Id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?.to_vec();
        log::debug!("{url}: status {status}, {} body bytes", bytes.len());
        Ok((status, task_id, bytes))
    }

    /// Poll a deferred task until it is terminal, then fetch its result.
    ///
    /// Unrecognized status codes count as non-terminal but still consume a
    /// poll attempt, so the loop is always bounded.
    async fn resolve_deferred(&self, task_id: &str) -> Result<(StatusCode, String, Vec<u8>)> {
        let mut polls = 0u32;
        loop {
            let status_url = self.endpoint(&task_path(task_id));
            let (status, _, bytes) = self.dispatch(Method::GET, &status_url, None).await?;
            if !status.is_success() {
                return Err(ClientError::api(status.as_u16(), "GET", &status_url, &bytes));
            }
            let task: Task = decode_json(&status_url, &bytes)?;

            match task.status() {
                TaskStatus::Complete => {
                    let result_path = if task.result_uri.is_empty() {
                        task_result_path(task_id)
                    } else {
                        task.result_uri
                    };
                    let result_url = self.endpoint(&result_path);
                    let (status, _, bytes) =
                        self.dispatch(Method::GET, &result_url, None).await?;
                    return Ok((status, result_url, bytes));
                }
                TaskStatus::Error => {
                    return Err(ClientError::Task {
                        task_id: task_id.to_owned(),
                        message: task.message,
                    });
                }
                pending => {
                    polls += 1;
                    if polls >= self.task_poll.max_attempts {
                        return Err(ClientError::PollExhausted {
                            task_id: task_id.to_owned(),
                            attempts: polls,
                        });
                    }
                    log::debug!(
                        "task {task_id} is {pending:?} (poll {polls}/{}), waiting {:.1}s",
                        self.task_poll.max_attempts,
                        self.task_poll.backoff.as_secs_f32()
                    );
                    tokio::time::sleep(self.task_poll.backoff).await;
                }
            }
        }
    }
}
