use reqwest::StatusCode;
use thiserror::Error;

use crate::data::GroupId;

/// All of the ways a FullNode API call can fail before, during or after the
/// round trip to the node
#[derive(Error, Debug)]
pub enum FullNodeError {
    #[error("{0}")]
    Other(anyhow::Error),

    #[error("Invalid parameter: {0}")]
    ParamValue(String),

    #[error("Not a member of group <{0}>")]
    NotInGroup(GroupId),

    #[error("Not the owner of group <{0}>")]
    NotGroupOwner(GroupId),

    #[error("Node responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected response from node: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

impl From<anyhow::Error> for FullNodeError {
    fn from(error: anyhow::Error) -> Self {
        FullNodeError::Other(error)
    }
}
