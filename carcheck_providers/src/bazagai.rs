use async_trait::async_trait;
use carcheck_config::BazaGaiConfig;
use carcheck_core::{ProviderError, Query, VehicleProvider, VehicleRecord};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use crate::http::{read_json, request_error, status_error};
use crate::json::{localized, text};

const SOURCE: &str = "Baza-Gai";

/// Preference order for language-keyed objects.
const LANGS: &[&str] = &["ua", "en", "slug"];

/// Baza-Gai registry: separate endpoints for VINs and plate numbers,
/// HTTP status alone says found or not.
pub struct BazaGaiProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl BazaGaiProvider {
    #[must_use]
    pub fn new(client: Client, config: &BazaGaiConfig) -> Self {
        Self {
            client,
            api_key: config.api_key().map(ToString::to_string),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, query: &Query) -> String {
        let kind = if query.is_vin() { "vin" } else { "nomer" };
        format!("{}/{kind}/{query}", self.base_url)
    }
}

/// Most recent registration operation, if the registry sent any.
fn latest_operation(operations: &[Value]) -> Option<&Value> {
    operations
        .iter()
        .find(|op| op.get("is_last").and_then(Value::as_bool) == Some(true))
        .or_else(|| operations.first())
}

fn engine_of(operation: &Value) -> String {
    let fuel = operation.get("fuel").and_then(|v| localized(v, LANGS));
    let displacement = operation
        .get("displacement")
        .and_then(text)
        .map(|cc| format!("{cc} см³"));
    [fuel, displacement]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_record(data: &Value) -> VehicleRecord {
    let mut record = VehicleRecord::new(SOURCE);
    let operations = data
        .get("operations")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let latest = latest_operation(operations);

    if let Some(vendor) = data.get("vendor").and_then(text) {
        record.set_vendor(vendor);
    }
    if let Some(model) = data.get("model").and_then(text) {
        record.set_model(model);
    }
    if let Some(year) = data.get("model_year").and_then(text) {
        record.set_year(year);
    }

    let color = data
        .get("color")
        .filter(|v| !v.is_null())
        .or_else(|| latest.and_then(|op| op.get("color")))
        .and_then(|v| localized(v, LANGS));
    if let Some(color) = color {
        record.set_color(color);
    }

    if let Some(op) = latest {
        record.set_engine(engine_of(op));
    }

    if !operations.is_empty() {
        record.set_owners_count(operations.len().to_string());
    }

    record.is_stolen = data
        .get("is_stolen")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    record.set_photo_url(data.get("photo_url").and_then(text));

    record
}

#[async_trait]
impl VehicleProvider for BazaGaiProvider {
    fn name(&self) -> &str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, query: &Query) -> Result<Option<VehicleRecord>, ProviderError> {
        let Some(api_key) = &self.api_key else {
            debug!("{SOURCE}: api_key not set, skipping");
            return Ok(None);
        };

        let url = self.endpoint(query);
        debug!("{SOURCE}: GET {url}");
        let response = self
            .client
            .get(url)
            .header("X-Api-Key", api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::OK => {
                let data: Value = read_json(response).await?;
                if !data.is_object() {
                    return Err(ProviderError::Decode("expected a JSON object".to_string()));
                }
                let record = to_record(&data);
                if !record.has_data() {
                    info!("{SOURCE}: empty record for {query}");
                    return Ok(None);
                }
                Ok(Some(record))
            }
            StatusCode::NOT_FOUND => {
                info!("{SOURCE}: no vehicle for {query}");
                Ok(None)
            }
            _ => Err(status_error(response).await),
        }
    }
}
