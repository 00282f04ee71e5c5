//! Cliente del registro público de VIN (NHTSA vPIC)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{error_from_response, ClientError, ClientResult, VinDecoder};

/// Datos del vehículo obtenidos de un VIN
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VinDecodeResult {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub vin: String,
}

/// Marca registrada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeInfo {
    pub make_id: i64,
    pub make_name: String,
}

#[derive(Debug, Deserialize)]
struct NhtsaResponse<T> {
    #[serde(rename = "Results", default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DecodedVariable {
    #[serde(rename = "Variable")]
    variable: String,
    #[serde(rename = "Value")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NhtsaMake {
    #[serde(rename = "Make_ID")]
    make_id: i64,
    #[serde(rename = "Make_Name")]
    make_name: String,
}

#[derive(Debug, Deserialize)]
struct NhtsaModel {
    #[serde(rename = "Model_Name")]
    model_name: String,
}

/// Valor no vacío de una variable decodificada
fn variable<'a>(results: &'a [DecodedVariable], name: &str) -> Option<&'a str> {
    results
        .iter()
        .find(|r| r.variable == name)
        .and_then(|r| r.value.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Marca, modelo y año son obligatorios; si falta alguno el VIN no se reconoce
fn parse_decoded(vin: &str, results: &[DecodedVariable]) -> Option<VinDecodeResult> {
    let make = variable(results, "Make")?;
    let model = variable(results, "Model")?;
    let year = variable(results, "Model Year")?.parse::<i32>().ok()?;
    let trim = variable(results, "Trim").map(str::to_string);

    Some(VinDecodeResult {
        make: make.to_string(),
        model: model.to_string(),
        year,
        trim,
        vin: vin.to_string(),
    })
}

pub struct NhtsaClient {
    client: Client,
    base_url: String,
}

impl NhtsaClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_results<T: for<'de> Deserialize<'de>>(&self, path: &str) -> ClientResult<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ NHTSA respondió {} para {}", status, path);
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        let parsed: NhtsaResponse<T> = serde_json::from_str(&body)
            .map_err(|e| ClientError::Decode(format!("NHTSA response: {}", e)))?;
        Ok(parsed.results)
    }
}

#[async_trait]
impl VinDecoder for NhtsaClient {
    async fn decode_vin(&self, vin: &str) -> ClientResult<Option<VinDecodeResult>> {
        info!("🔎 Decodificando VIN {}", vin);
        let path = format!("/vehicles/DecodeVin/{}", urlencoding::encode(vin));
        let results: Vec<DecodedVariable> = self.get_results(&path).await?;
        Ok(parse_decoded(vin, &results))
    }

    async fn get_all_makes(&self) -> ClientResult<Vec<MakeInfo>> {
        let makes: Vec<NhtsaMake> = self.get_results("/vehicles/GetAllMakes").await?;
        Ok(makes
            .into_iter()
            .map(|m| MakeInfo {
                make_id: m.make_id,
                make_name: m.make_name,
            })
            .collect())
    }

    async fn get_models_for_make_year(&self, make: &str, year: i32) -> ClientResult<Vec<String>> {
        let path = format!(
            "/vehicles/GetModelsForMakeYear/make/{}/modelyear/{}",
            urlencoding::encode(make),
            year
        );
        let models: Vec<NhtsaModel> = self.get_results(&path).await?;
        Ok(models.into_iter().map(|m| m.model_name).collect())
    }
}
