use serde::{Deserialize, Serialize};

/// Body posted to the transactional email endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub text: &'a str,
}

/// Acknowledgement returned by the provider once a message is queued.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub id: Option<String>,
}
