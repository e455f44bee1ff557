use anyhow::Context;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::model::RemoteConfig;

use super::{
    Document, DocumentEntry, ErrorBody, FieldPath, FieldUpdate, PatchRequest, RemoteError,
    RemoteGateway,
};

/// [`RemoteGateway`] backed by a `subtrack-docstore` server.
pub struct HttpGateway {
    base_url: Url,
    token: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(remote: &RemoteConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&remote.base_url)
            .with_context(|| format!("parse remote url {}", remote.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("remote url {} cannot be used as a base url", remote.base_url);
        }
        let client = reqwest::Client::builder()
            .user_agent("subtrack")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url,
            token: remote.token.clone(),
            client,
        })
    }

    fn documents_url(&self, collection: &str, key: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["collections", collection, "documents"]);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        url
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn ensure_ok(
        &self,
        resp: reqwest::Response,
        label: &str,
    ) -> Result<reqwest::Response, RemoteError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = if status == StatusCode::UNAUTHORIZED {
            "unauthorized (token invalid; run `subtrack login --url ... --token ...`)".to_string()
        } else {
            resp.json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string())
        };
        Err(RemoteError::Status {
            operation: label.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

fn transport(label: &str, err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(format!("{}: {}", label, err))
}

fn decode(label: &str, err: reqwest::Error) -> RemoteError {
    RemoteError::Decode(format!("parse {} response: {}", label, err))
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, RemoteError> {
        let label = "get document";
        let resp = self
            .client
            .get(self.documents_url(collection, Some(key)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .await
            .map_err(|e| transport(label, e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let entry: DocumentEntry = self
            .ensure_ok(resp, label)
            .await?
            .json()
            .await
            .map_err(|e| decode(label, e))?;
        Ok(Some(entry.fields))
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Document,
        merge: bool,
    ) -> Result<(), RemoteError> {
        let label = "set document";
        let resp = self
            .client
            .put(self.documents_url(collection, Some(key)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .query(&[("merge", merge)])
            .json(&document)
            .send()
            .await
            .map_err(|e| transport(label, e))?;
        self.ensure_ok(resp, label).await?;
        Ok(())
    }

    async fn update_field(
        &self,
        collection: &str,
        key: &str,
        path: &FieldPath,
        update: FieldUpdate,
    ) -> Result<(), RemoteError> {
        let label = "update field";
        let resp = self
            .client
            .patch(self.documents_url(collection, Some(key)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&PatchRequest {
                path: path.clone(),
                op: update,
            })
            .send()
            .await
            .map_err(|e| transport(label, e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        }
        self.ensure_ok(resp, label).await?;
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, RemoteError> {
        let label = "list documents";
        let resp = self
            .client
            .get(self.documents_url(collection, None))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .await
            .map_err(|e| transport(label, e))?;

        let entries: Vec<DocumentEntry> = self
            .ensure_ok(resp, label)
            .await?
            .json()
            .await
            .map_err(|e| decode(label, e))?;
        Ok(entries.into_iter().map(|e| (e.key, e.fields)).collect())
    }
}
