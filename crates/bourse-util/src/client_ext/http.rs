use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{error, trace};

/// Build the [`reqwest::Client`] shared by every endpoint request.
///
/// A `USER_AGENT` is only set when one is configured; `timeout` bounds each
/// whole request (connect, headers & body).
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
pub fn build_client(user_agent: Option<&str>, timeout: Option<Duration>) -> Result<Client> {
    let mut builder = reqwest::ClientBuilder::new();
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent);
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

pub trait ClientHttpExt {
    fn get_json<T>(&self, url: &str) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientHttpExt for Client {
    /// GET request `url` and deserialize the JSON body into `T`.
    ///
    /// Anything other than a success status is an error; the body is not read.
    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        trace!("GET {url}");
        let response = self.get(url).send().await.map_err(|e| {
            error!("request error: {e}\nURL: {url}");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("unexpected status {status}\nURL: {url}");
            return Err(anyhow!("{url} responded with status {status}"));
        }

        let body = response.bytes().await.map_err(|e| {
            error!("byte transformation error: {e}\nURL: {url}");
            e
        })?;

        // error check the deserialization
        let data = serde_json::from_slice::<T>(&body).map_err(|e| {
            error!("deserialization error: {e}\nURL: {url}");
            e
        })?;
        trace!("{url} fetched & deserialized ({} bytes)", body.len());

        Ok(data)
    }
}
