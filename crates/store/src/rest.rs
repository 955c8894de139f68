//! Hosted backend REST table.
//!
//! Talks to a PostgREST-style endpoint (`{url}/rest/v1/{table}`) holding a
//! `{id, value, updated_at}` row. Blocking reqwest client.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde_json::{json, Value};

use crate::{SettingsStore, StoreError};

/// Settings row in a hosted table.
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: String,
    table: String,
    row_id: i64,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, row_id: i64, api_key: &str) -> Result<Self, StoreError> {
        let http = Client::builder()
            .user_agent(format!("folio/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            row_id,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

impl SettingsStore for RestStore {
    fn read(&self) -> Result<Option<Value>, StoreError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("id", format!("eq.{}", self.row_id)), ("select", "value".to_string())])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let rows: Value = check_status(response)?
            .json()
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        let rows = rows
            .as_array()
            .ok_or_else(|| StoreError::Parse("expected an array of rows".into()))?;

        log::debug!("{} returned {} row(s)", self.endpoint(), rows.len());

        Ok(rows
            .first()
            .map(|row| row["value"].clone())
            .filter(|value| !value.is_null()))
    }

    fn write(&self, raw: &Value) -> Result<(), StoreError> {
        let body = json!([{
            "id": self.row_id,
            "value": raw,
            "updated_at": chrono::Utc::now().to_rfc3339(),
        }]);

        let response = self
            .http
            .post(self.endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response)?;
        log::info!("settings row {} upserted to {}", self.row_id, self.endpoint());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("rest:{}#{}", self.endpoint(), self.row_id)
    }
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let body = response.text().unwrap_or_default();
    match code {
        401 | 403 => Err(StoreError::Unauthorized(body)),
        _ => Err(StoreError::Http(code, body)),
    }
}
