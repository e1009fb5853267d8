//! Minimal Cosmos DB SQL API client over REST.
//!
//! Requests are signed with the account master key (HMAC-SHA256 over the
//! verb/resource/date tuple). Queries always run cross-partition and follow
//! the `x-ms-continuation` header, so a query call returns the full result
//! set. Nothing here retries: a failed request surfaces as `Error::Store`
//! or `Error::Http` and the caller reports it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::store::query::{self, SqlQuery};

const COSMOS_API_VERSION: &str = "2018-12-31";

#[derive(Clone)]
pub struct CosmosClient {
    http: reqwest::Client,
    endpoint: String,
    key: String,
    database: String,
}

impl CosmosClient {
    pub fn new(endpoint: &str, key: &str, database: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key: key.to_string(),
            database: database.to_string(),
        })
    }

    pub fn container(&self, collection: &str) -> Container {
        Container {
            client: self.clone(),
            collection: collection.to_string(),
        }
    }
}

/// Handle on one collection; cheap to clone and share across services.
#[derive(Clone)]
pub struct Container {
    client: CosmosClient,
    collection: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    #[serde(rename = "Documents", default = "Vec::new")]
    documents: Vec<T>,
}

impl Container {
    pub fn name(&self) -> &str {
        &self.collection
    }

    fn docs_url(&self) -> String {
        format!(
            "{}/dbs/{}/colls/{}/docs",
            self.client.endpoint, self.client.database, self.collection
        )
    }

    fn resource_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.client.database, self.collection)
    }

    /// Runs a query and drains every result page.
    pub async fn query<T: DeserializeOwned>(&self, query: &SqlQuery) -> Result<Vec<T>> {
        let url = self.docs_url();
        let link = self.resource_link();
        let body = serde_json::to_string(query)?;

        let mut documents = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let date = rfc1123(Utc::now());
            let auth = auth_token(&self.client.key, "post", "docs", &link, &date)?;

            let mut request = self
                .client
                .http
                .post(&url)
                .header("authorization", auth)
                .header("x-ms-date", date)
                .header("x-ms-version", COSMOS_API_VERSION)
                .header("x-ms-documentdb-isquery", "True")
                .header("x-ms-documentdb-query-enablecrosspartition", "True")
                .header(CONTENT_TYPE, "application/query+json")
                .body(body.clone());
            if let Some(token) = &continuation {
                request = request.header("x-ms-continuation", token);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(store_error(response).await);
            }

            continuation = response
                .headers()
                .get("x-ms-continuation")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let page: QueryResponse<T> = response.json().await?;
            documents.extend(page.documents);

            if continuation.is_none() {
                return Ok(documents);
            }
        }
    }

    pub async fn query_first<T: DeserializeOwned>(&self, query: &SqlQuery) -> Result<Option<T>> {
        let mut documents = self.query(query).await?;
        if documents.is_empty() {
            Ok(None)
        } else {
            Ok(Some(documents.remove(0)))
        }
    }

    pub async fn list_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.query(&query::all()).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Value>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.query_first(&query::by_id(id)).await
    }

    /// An empty id list means "no matches"; no request is issued.
    pub async fn find_by_id_in(&self, ids: &[String]) -> Result<Vec<Value>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query(&query::by_id_in(ids)).await
    }

    pub async fn find_by_id_projected(&self, id: &str, fields: &[&str]) -> Result<Option<Value>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.query_first(&query::by_id_projected(fields, id)).await
    }

    pub async fn find_by_id_in_projected(
        &self,
        ids: &[String],
        fields: &[&str],
    ) -> Result<Vec<Value>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query(&query::by_id_in_projected(fields, ids)).await
    }

    /// Creates or replaces a document. The partition key value must match
    /// the container's partition path (all our containers partition on /id).
    pub async fn upsert<T>(&self, document: &T, partition_key: &str) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let url = self.docs_url();
        let link = self.resource_link();
        let date = rfc1123(Utc::now());
        let auth = auth_token(&self.client.key, "post", "docs", &link, &date)?;

        let response = self
            .client
            .http
            .post(&url)
            .header("authorization", auth)
            .header("x-ms-date", date)
            .header("x-ms-version", COSMOS_API_VERSION)
            .header("x-ms-documentdb-is-upsert", "True")
            .header("x-ms-documentdb-partitionkey", json!([partition_key]).to_string())
            .json(document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }

        Ok(response.json().await?)
    }
}

async fn store_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| String::new());
    Error::Store(format!("Cosmos returned {}: {}", status, body))
}

fn rfc1123(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Builds the master-key authorization header value. The signed payload is
/// `verb \n resource-type \n resource-link \n date \n \n` with verb,
/// resource type and date lowercased; the token itself is form-urlencoded.
fn auth_token(
    key: &str,
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> Result<String> {
    let key = BASE64
        .decode(key)
        .map_err(|_| Error::Config("COSMOS_KEY is not valid base64".to_string()))?;

    let payload = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase()
    );

    let mut mac = Hmac::<Sha256>::new_from_slice(&key)
        .map_err(|_| Error::Config("COSMOS_KEY has an invalid length".to_string()))?;
    mac.update(payload.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    let token = format!("type=master&ver=1.0&sig={}", signature);
    Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rfc1123_renders_a_gmt_date() {
        let at = Utc.with_ymd_and_hms(2026, 8, 27, 0, 0, 0).unwrap();
        assert_eq!(rfc1123(at), "Thu, 27 Aug 2026 00:00:00 GMT");
    }

    #[test]
    fn auth_token_matches_known_signature() {
        // Key is base64 of a fixed 32-byte string; the expected value was
        // produced with a reference HMAC-SHA256 implementation.
        let key = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";
        let token = auth_token(
            key,
            "POST",
            "docs",
            "dbs/tutor/colls/topic_cluster",
            "Thu, 27 Aug 2026 00:00:00 GMT",
        )
        .unwrap();
        assert_eq!(
            token,
            "type%3Dmaster%26ver%3D1.0%26sig%3D0q7ysK%2FXgt6NNr3tBk92D6SWrPfpyAwc%2FiAcBH0J5H0%3D"
        );
    }

    #[test]
    fn auth_token_rejects_a_non_base64_key() {
        let err = auth_token("not base64!!", "get", "docs", "dbs/x", "date").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
