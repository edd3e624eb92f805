use async_trait::async_trait;
use carcheck_config::AutoRiaConfig;
use carcheck_core::{ProviderError, Query, VehicleProvider, VehicleRecord};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::http::{read_json, request_error, status_error};
use crate::json::text;

const SOURCE: &str = "AUTO.RIA";

/// Ukrainian-language labels in chip names.
const LANG_ID: u32 = 4;
/// Look-back window for listings, days.
const PERIOD_DAYS: u32 = 365;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParamsResponse {
    #[serde(default)]
    notice_data: Option<Vec<Notice>>,
    #[serde(default)]
    chips_data: Option<ChipsData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Notice {
    #[serde(default)]
    notice_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChipsData {
    #[serde(default)]
    chips: Vec<Chip>,
}

#[derive(Debug, Deserialize)]
struct Chip {
    #[serde(default)]
    entity: String,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    value: Value,
}

impl ParamsResponse {
    fn has_error_notice(&self) -> bool {
        self.notice_data
            .iter()
            .flatten()
            .any(|n| n.notice_type.as_deref() == Some("error"))
    }

    fn chips(&self) -> &[Chip] {
        self.chips_data
            .as_ref()
            .map(|d| d.chips.as_slice())
            .unwrap_or_default()
    }

    fn chip(&self, entity: &str) -> Option<&Chip> {
        self.chips().iter().find(|c| c.entity == entity)
    }

    fn chip_name(&self, entity: &str) -> Option<String> {
        self.chip(entity).and_then(|c| text(&c.name))
    }

    /// Lower bound of a range chip (`{"gte": ..}`).
    fn chip_gte(&self, entity: &str) -> Option<String> {
        self.chip(entity).and_then(|c| c.value.get("gte")).and_then(text)
    }

    fn into_record(self) -> VehicleRecord {
        let mut record = VehicleRecord::new(SOURCE);

        if let Some(vendor) = self.chip_name("brandId") {
            record.set_vendor(vendor);
        }
        if let Some(model) = self.chip_name("modelId") {
            record.set_model(model);
        }
        if let Some(year) = self.chip_gte("year") {
            record.set_year(year);
        }
        if let Some(color) = self.chip_name("colorId") {
            record.set_color(color);
        }

        let engine = [self.chip_name("fuelId"), self.chip_name("modificationId")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        record.set_engine(engine);

        if let Some(mileage) = self.chip_gte("mileage") {
            record.set_mileage(format!("{mileage} тис. км"));
        }

        record
    }
}

/// AUTO.RIA listing parameters lookup. One `omniId` field takes either a
/// VIN or a plate; the service works out which.
pub struct AutoRiaProvider {
    client: Client,
    credentials: Option<(String, String)>,
    base_url: String,
}

impl AutoRiaProvider {
    #[must_use]
    pub fn new(client: Client, config: &AutoRiaConfig) -> Self {
        Self {
            client,
            credentials: config
                .credentials()
                .map(|(key, user)| (key.to_string(), user.to_string())),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl VehicleProvider for AutoRiaProvider {
    fn name(&self) -> &str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch(&self, query: &Query) -> Result<Option<VehicleRecord>, ProviderError> {
        let Some((api_key, user_id)) = &self.credentials else {
            debug!("{SOURCE}: api_key/user_id not set, skipping");
            return Ok(None);
        };

        let payload = json!({
            "langId": LANG_ID,
            "period": PERIOD_DAYS,
            "params": { "omniId": query.as_str() },
        });

        let url = Url::parse_with_params(
            &format!("{}/auto/params/by/vin-code/", self.base_url),
            [("user_id", user_id.as_str()), ("api_key", api_key.as_str())],
        )
        .map_err(|e| ProviderError::Http(format!("invalid base URL: {e}")))?;

        debug!("{SOURCE}: requesting params for {query}");
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(request_error)?;

        if response.status() != StatusCode::OK {
            return Err(status_error(response).await);
        }

        let data: ParamsResponse = read_json(response).await?;
        if data.has_error_notice() {
            info!("{SOURCE}: no listing for {query}");
            return Ok(None);
        }

        let record = data.into_record();
        if !record.has_data() {
            info!("{SOURCE}: empty parameters for {query}");
            return Ok(None);
        }
        Ok(Some(record))
    }
}
