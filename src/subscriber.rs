//! The inbound event, its validated form and the `ContactRecord` sent to the provider.
//! Includes structs that need to be validated, their parsing implementations and tests for those.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

/// The only status we ever submit to the provider.
pub const STATUS_SUBSCRIBED: &str = "subscribed";

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable invocation event
/// Produced by the form, can have invalid fields.
#[derive(Debug, Deserialize)]
pub struct InvocationEvent {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Validated Subscriber
/// The email is always present, a blank name is treated as no name at all.
#[derive(Debug, Clone)]
pub struct ValidSubscriber {
    pub email: ValidEmail,
    pub name: Option<ValidName>,
}

/// Validated Subscriber Email
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

/// Validated Subscriber Name
#[derive(Debug, Clone)]
pub struct ValidName(String);

/// The record the provider receives for one subscriber.
#[derive(Debug, Serialize)]
pub struct ContactRecord<'a> {
    pub email_address: &'a str,
    pub status: &'a str,
    pub status_if_new: &'a str,
    pub merge_fields: MergeFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct MergeFields<'a> {
    #[serde(rename = "FNAME", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
}

// ###################################
// ->   IMPLS
// ###################################
impl InvocationEvent {
    pub fn from_payload(payload: Value) -> Result<Self, DataParsingError> {
        serde_json::from_value(payload)
            .map_err(|er| DataParsingError::MalformedEvent(er.to_string()))
    }
}

impl TryFrom<InvocationEvent> for ValidSubscriber {
    type Error = DataParsingError;

    fn try_from(event: InvocationEvent) -> Result<Self, Self::Error> {
        let name = event
            .name
            .filter(|name| !name.trim().is_empty())
            .map(ValidName::parse)
            .transpose()?;

        Ok(ValidSubscriber {
            email: ValidEmail::parse(event.email)?,
            name,
        })
    }
}

impl ValidSubscriber {
    pub fn contact_record(&self) -> ContactRecord<'_> {
        ContactRecord {
            email_address: self.email.as_ref(),
            status: STATUS_SUBSCRIBED,
            status_if_new: STATUS_SUBSCRIBED,
            merge_fields: MergeFields {
                first_name: self.name.as_ref().map(AsRef::as_ref),
            },
        }
    }
}

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }

    /// Only the domain part, for logs.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }
}

impl AsRef<str> for ValidName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidName {
    /// Names longer than this many graphemes get cut, not rejected.
    pub const MAX_GRAPHEMES: usize = 256;

    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(DataParsingError::SubscriberNameEmpty);
        }

        let name = value.graphemes(true).take(Self::MAX_GRAPHEMES).collect();
        Ok(ValidName(name))
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("subscriber name is empty")]
    SubscriberNameEmpty,

    #[error("email is invalid")]
    EmailInvalid,
    #[error("email is longer than 256 graphemes")]
    EmailTooLong,
}
