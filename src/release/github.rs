//! GitHub REST client for the two calls a release needs
//!
//! - list recently updated closed pull requests (first page only)
//! - create a release for an existing tag

use crate::core::context::{ReleaseEnv, Repository};
use crate::core::error::{ApiError, MaintError, MaintResult};
use crate::release::pulls::PullRequest;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Hosting-service side of a release
pub trait HostingApi {
  /// Pull requests merged on `date`, taken from the `page_size` most recently updated
  /// closed pull requests
  fn merged_pulls(&self, date: NaiveDate, page_size: u32) -> MaintResult<Vec<PullRequest>>;

  /// Publish a release for `tag` with a markdown body
  fn create_release(&self, tag: &str, name: &str, body: &str) -> MaintResult<()>;
}

#[derive(Debug, Deserialize)]
struct ApiPull {
  number: u64,
  title: String,
  html_url: String,
  #[serde(default)]
  user: Option<ApiUser>,
  #[serde(default)]
  merged_at: Option<DateTime<Utc>>,
  #[serde(default)]
  labels: Vec<ApiLabel>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
  login: String,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
  name: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  message: String,
}

#[derive(Debug, Serialize)]
struct NewRelease<'a> {
  tag_name: &'a str,
  name: &'a str,
  body: &'a str,
}

impl From<ApiPull> for PullRequest {
  fn from(pull: ApiPull) -> Self {
    PullRequest {
      number: pull.number,
      title: pull.title,
      html_url: pull.html_url,
      author: pull.user.map(|u| u.login),
      merged_at: pull.merged_at,
      labels: pull.labels.into_iter().map(|l| l.name).collect(),
    }
  }
}

/// Blocking GitHub API client for one repository
pub struct GitHubClient {
  client: Client,
  api_url: String,
  repository: Repository,
  token: Option<String>,
}

impl GitHubClient {
  pub fn new(api_url: &str, env: &ReleaseEnv) -> MaintResult<Self> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self {
      client,
      api_url: api_url.trim_end_matches('/').to_string(),
      repository: env.repository.clone(),
      token: env.token.clone(),
    })
  }

  fn pulls_url(&self, page_size: u32) -> String {
    format!(
      "{}/repos/{}/pulls?state=closed&sort=updated&direction=desc&per_page={}&page=1",
      self.api_url, self.repository, page_size
    )
  }

  fn releases_url(&self) -> String {
    format!("{}/repos/{}/releases", self.api_url, self.repository)
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    let request = request
      .header("Accept", "application/vnd.github+json")
      .header("X-GitHub-Api-Version", "2022-11-28");
    match &self.token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }
}

/// Turn a non-success response into `ApiError::Status`, keeping GitHub's message
fn check_status(response: Response, url: &str) -> MaintResult<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let text = response.text().unwrap_or_default();
  let message = serde_json::from_str::<ApiErrorBody>(&text)
    .map(|body| body.message)
    .unwrap_or(text);

  Err(MaintError::Api(ApiError::Status {
    status: status.as_u16(),
    url: url.to_string(),
    message,
  }))
}

/// Parse a pull-request listing and keep those merged on `date`
fn parse_merged_pulls(body: &str, date: NaiveDate) -> MaintResult<Vec<PullRequest>> {
  let pulls: Vec<ApiPull> = serde_json::from_str(body)?;
  let fetched = pulls.len();

  let merged: Vec<PullRequest> = pulls
    .into_iter()
    .map(PullRequest::from)
    .filter(|pull| pull.merged_on(date))
    .collect();

  tracing::debug!(fetched, merged = merged.len(), %date, "filtered closed pull requests");
  Ok(merged)
}

impl HostingApi for GitHubClient {
  fn merged_pulls(&self, date: NaiveDate, page_size: u32) -> MaintResult<Vec<PullRequest>> {
    let url = self.pulls_url(page_size);
    tracing::info!(repository = %self.repository, %date, page_size, "fetching closed pull requests");

    let response = self.authorize(self.client.get(&url)).send()?;
    let body = check_status(response, &url)?.text()?;

    parse_merged_pulls(&body, date)
  }

  fn create_release(&self, tag: &str, name: &str, body: &str) -> MaintResult<()> {
    let url = self.releases_url();
    tracing::info!(repository = %self.repository, %tag, "creating GitHub release");

    let payload = NewRelease {
      tag_name: tag,
      name,
      body,
    };
    let response = self.authorize(self.client.post(&url)).json(&payload).send()?;
    check_status(response, &url)?;

    Ok(())
  }
}
