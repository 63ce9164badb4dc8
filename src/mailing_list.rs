use md5::{Digest, Md5};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::{config::MailingListConfig, subscriber::ContactRecord};

/// The provider ignores the basic auth username, only the API key matters.
const BASIC_AUTH_USER: &str = "anystring";
const API_VERSION: &str = "3.0";

#[derive(Debug)]
pub struct MailingListClient {
    pub http_client: Client,
    pub base_url: Url,
    api_key: SecretString,
}

impl MailingListClient {
    pub fn new<S: AsRef<str>>(
        base_url: S,
        api_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::UrlParsing(format!("not a base url: {base_url}")));
        }

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(MailingListClient {
            http_client,
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &MailingListConfig) -> Result<Self> {
        Self::new(&config.base_url, config.api_key.clone(), config.timeout)
    }

    /// `PUT /3.0/lists/{list_id}/members/{subscriber_hash}`
    /// Adds the contact to the list, or updates it if it is already a member.
    #[tracing::instrument(name = "Upserting list member", skip(self, record))]
    pub async fn upsert_member(
        &self,
        list_id: &str,
        record: &ContactRecord<'_>,
    ) -> Result<ListMember> {
        let url = self.member_url(list_id, &subscriber_hash(record.email_address))?;

        let resp = self
            .http_client
            .put(url)
            .basic_auth(BASIC_AUTH_USER, Some(self.api_key.expose_secret()))
            .json(record)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let problem: ProblemDetail = serde_json::from_slice(&body).unwrap_or_default();
            return Err(Error::Rejected {
                status: status.as_u16(),
                title: problem.title.unwrap_or_default(),
                detail: problem.detail.unwrap_or_default(),
            });
        }

        // The member is only used for logging, a body we can't read is not a failure.
        let member: ListMember = serde_json::from_slice(&body).unwrap_or_default();
        debug!("{:<12} - provider accepted member: {:?}", "UPSERT", member.id);

        Ok(member)
    }

    fn member_url(&self, list_id: &str, subscriber_hash: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::UrlParsing(format!("not a base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend([API_VERSION, "lists", list_id, "members", subscriber_hash]);
        Ok(url)
    }
}

/// The provider keys list members by the MD5 hex digest of the lowercased email.
pub fn subscriber_hash(email: &str) -> String {
    hex::encode(Md5::digest(email.to_lowercase().as_bytes()))
}

/// The parts of the provider's member reply we care about.
#[derive(Debug, Default, Deserialize)]
pub struct ListMember {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// Error document the provider returns on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ProblemDetail {
    title: Option<String>,
    detail: Option<String>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("provider rejected the request with status {status}: {title} {detail}")]
    Rejected {
        status: u16,
        title: String,
        detail: String,
    },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
