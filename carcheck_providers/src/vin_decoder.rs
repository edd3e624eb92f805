use async_trait::async_trait;
use carcheck_config::VinDecoderConfig;
use carcheck_core::{ProviderError, Query, VehicleProvider, VehicleRecord};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

use crate::http::{read_json, request_error, status_error};

const SOURCE: &str = "VIN decoder";

#[derive(Debug, Deserialize)]
struct DecodeResponse {
    #[serde(rename = "Results", default)]
    results: Vec<DecodedVin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct DecodedVin {
    make: String,
    model: String,
    model_year: String,
    #[serde(rename = "DisplacementL")]
    displacement_l: String,
    fuel_type_primary: String,
    error_code: String,
    error_text: String,
}

impl DecodedVin {
    /// The service answers 200 even for undecodable VINs and reports the
    /// problem through `ErrorCode`; "0" is a clean decode.
    fn is_decoded(&self) -> bool {
        let code = self.error_code.split(',').next().unwrap_or_default().trim();
        code == "0" && !self.make.trim().is_empty()
    }

    fn into_record(self) -> VehicleRecord {
        let mut record = VehicleRecord::new(SOURCE);
        record.set_vendor(self.make);
        record.set_model(self.model);
        record.set_year(self.model_year);

        let displacement = Some(self.displacement_l.trim())
            .filter(|d| !d.is_empty())
            .map(|d| format!("{d} L"));
        let fuel = Some(self.fuel_type_primary.trim().to_string()).filter(|f| !f.is_empty());
        let engine = [fuel, displacement]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        record.set_engine(engine);

        record
    }
}

/// Free VIN decoding service (vPIC-compatible `DecodeVinValues`). Knows
/// nothing about plates, so plate queries return without a request.
pub struct VinDecoderProvider {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl VinDecoderProvider {
    #[must_use]
    pub fn new(client: Client, config: &VinDecoderConfig) -> Self {
        Self {
            client,
            base_url: config
                .base_url()
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key: config.api_key().map(ToString::to_string),
        }
    }
}

#[async_trait]
impl VehicleProvider for VinDecoderProvider {
    fn name(&self) -> &str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn fetch(&self, query: &Query) -> Result<Option<VehicleRecord>, ProviderError> {
        let Some(base_url) = &self.base_url else {
            debug!("{SOURCE}: base URL not set, skipping");
            return Ok(None);
        };

        if !query.is_vin() {
            debug!("{SOURCE}: {query} is not a VIN, skipping");
            return Ok(None);
        }

        let mut params = vec![("format", "json")];
        if let Some(api_key) = &self.api_key {
            params.push(("api_key", api_key.as_str()));
        }
        let url = Url::parse_with_params(&format!("{base_url}/DecodeVinValues/{query}"), params)
            .map_err(|e| ProviderError::Http(format!("invalid base URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(request_error)?;
        if response.status() != StatusCode::OK {
            return Err(status_error(response).await);
        }

        let data: DecodeResponse = read_json(response).await?;
        let Some(decoded) = data.results.into_iter().next() else {
            info!("{SOURCE}: empty result for {query}");
            return Ok(None);
        };

        if !decoded.is_decoded() {
            info!(
                "{SOURCE}: could not decode {query}: {} {}",
                decoded.error_code, decoded.error_text
            );
            return Ok(None);
        }

        Ok(Some(decoded.into_record()))
    }
}
