use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{data::Jwt, error::FullNodeError};

const USER_AGENT: &str = concat!("quorum-fullnode/", env!("CARGO_PKG_VERSION"));

/// A thin wrapper over [reqwest::Client] that knows the API base of a FullNode
/// and attaches the configured JWT as a bearer credential to every request.
///
/// All request and response bodies are JSON. Responses with a non-2xx status
/// are never deserialized; they surface as [FullNodeError::Status] carrying
/// the status code and the raw body text the node produced.
pub struct HttpClient {
    api_base: Url,
    token: Option<Jwt>,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(api_base: Url, token: Option<Jwt>) -> Result<Self, FullNodeError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(HttpClient {
            api_base,
            token,
            client,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn token(&self) -> Option<&Jwt> {
        self.token.as_ref()
    }

    /// Replace the bearer credential used for subsequent requests, e.g. after
    /// the node has issued a fresh token
    pub fn set_token(&mut self, token: Option<Jwt>) {
        self.token = token;
    }

    pub async fn get<T>(&self, url: Url) -> Result<T, FullNodeError>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", url);
        self.dispatch(self.client.get(url)).await
    }

    pub async fn post<B, T>(&self, url: Url, body: Option<&B>) -> Result<T, FullNodeError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);

        let mut request = self.client.post(url);

        if let Some(body) = body {
            request = request.json(body);
        }

        self.dispatch(request).await
    }

    async fn dispatch<T>(&self, mut request: RequestBuilder) -> Result<T, FullNodeError>
    where
        T: DeserializeOwned,
    {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Node responded with status {}", status);

        if !status.is_success() {
            return Err(FullNodeError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|error| {
            FullNodeError::UnexpectedResponse(format!("{error} (body was: {body:?})"))
        })
    }
}
