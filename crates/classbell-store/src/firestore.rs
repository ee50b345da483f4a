//! Schedule documents read from a Cloud Firestore collection over REST.
//!
//! Lists `projects/{project}/databases/(default)/documents/{collection}`
//! page by page and converts Firestore's typed values into plain JSON before
//! handing each record to [`decode_document`].

use classbell_schedule::ScheduleDocument;
use futures::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::decode::decode_document;
use crate::{ScheduleStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    collection: String,
    access_token: String,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreStore {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        collection: impl Into<String>,
        access_token: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            project_id: project_id.into(),
            collection: collection.into(),
            access_token: access_token.into(),
            page_size,
        }
    }

    fn page_url(&self, page_token: Option<&str>) -> StoreResult<Url> {
        let raw = format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.collection
        );
        let mut url = Url::parse(&raw).map_err(|e| StoreError::Decode(format!("{raw}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &self.page_size.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> StoreResult<ListDocumentsResponse> {
        let url = self.page_url(page_token)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ListDocumentsResponse>().await?)
    }

    async fn fetch_all(&self) -> StoreResult<Vec<ScheduleDocument>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            tracing::trace!(count = page.documents.len(), "Fetched Firestore page");

            for document in page.documents {
                let id = document
                    .name
                    .rsplit('/')
                    .next()
                    .unwrap_or(document.name.as_str())
                    .to_string();
                let record = Value::Object(plain_fields(&document.fields));
                documents.push(decode_document(id, &record));
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(
            collection = %self.collection,
            count = documents.len(),
            "Read schedule documents from Firestore"
        );
        Ok(documents)
    }
}

impl ScheduleStore for FirestoreStore {
    fn fetch_documents(&self) -> BoxFuture<'_, StoreResult<Vec<ScheduleDocument>>> {
        Box::pin(self.fetch_all())
    }
}

fn plain_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), plain_value(value)))
        .collect()
}

/// ## Summary
/// Converts one Firestore typed value (`{"stringValue": ...}` etc.) to plain JSON.
///
/// Unknown value kinds become `null`.
#[must_use]
pub fn plain_value(value: &Value) -> Value {
    let Some(typed) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = typed.get("stringValue") {
        return s.clone();
    }
    if let Some(s) = typed.get("timestampValue") {
        return s.clone();
    }
    if let Some(v) = typed.get("integerValue") {
        // Firestore sends 64-bit integers as decimal strings.
        return match v {
            Value::String(s) => s.parse::<i64>().map_or_else(|_| v.clone(), Value::from),
            other => other.clone(),
        };
    }
    if let Some(v) = typed.get("doubleValue").or_else(|| typed.get("booleanValue")) {
        return v.clone();
    }
    if let Some(array) = typed.get("arrayValue") {
        let values = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(plain_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(map) = typed.get("mapValue") {
        let fields = map
            .get("fields")
            .and_then(Value::as_object)
            .map(plain_fields)
            .unwrap_or_default();
        return Value::Object(fields);
    }

    Value::Null
}
