//! Shared PostgREST request plumbing for the note and user stores.

use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StoreError;

/// Thin wrapper over `reqwest::Client` that applies the Supabase headers
/// and turns non-2xx responses into [`StoreError::Server`].
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    http: reqwest::Client,
    pub(crate) base_url: String,
    api_key: String,
}

impl RestClient {
    /// `base_url` is the Supabase project URL, with or without a trailing
    /// slash.
    pub(crate) fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, StoreError> {
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// POST a row and return the created representation.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .delete(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn check(resp: Response) -> Result<Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(StoreError::Server {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = RestClient::new("https://x.supabase.co/".into(), "key".into());
        assert_eq!(client.base_url, "https://x.supabase.co");
        assert_eq!(
            client.table_url("Journals"),
            "https://x.supabase.co/rest/v1/Journals"
        );
    }

    #[test]
    fn keeps_bare_url() {
        let client = RestClient::new("https://x.supabase.co".into(), "key".into());
        assert_eq!(client.table_url("Users"), "https://x.supabase.co/rest/v1/Users");
    }
}
