use std::sync::Arc;

use tracing::info;

use crate::clients::{MakeInfo, VinDecodeResult, VinDecoder};
use crate::state::AppState;
use crate::utils::errors::{field_error, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_model_year, validate_not_empty, VIN_LENGTH};

pub const VIN_NOT_DECODED: &str = "Could not decode VIN. Please enter manually.";

pub struct VinController {
    vin: Arc<dyn VinDecoder>,
}

impl VinController {
    pub fn new(state: &AppState) -> Self {
        Self { vin: state.vin.clone() }
    }

    pub async fn decode(&self, vin: &str) -> AppResult<VinDecodeResult> {
        let vin = vin.trim().to_uppercase();
        if vin.chars().count() != VIN_LENGTH {
            return Err(validation_error("vin", "VIN must be 17 characters"));
        }

        let decoded = self
            .vin
            .decode_vin(&vin)
            .await?
            .ok_or_else(|| AppError::NotFound(VIN_NOT_DECODED.to_string()))?;

        info!("🔎 VIN {} decodificado: {} {} {}", vin, decoded.year, decoded.make, decoded.model);
        Ok(decoded)
    }

    pub async fn makes(&self) -> AppResult<Vec<MakeInfo>> {
        Ok(self.vin.get_all_makes().await?)
    }

    pub async fn models(&self, make: &str, year: i32) -> AppResult<Vec<String>> {
        validate_not_empty(make).map_err(|e| field_error("make", e))?;
        validate_model_year(year).map_err(|e| field_error("year", e))?;

        Ok(self.vin.get_models_for_make_year(make.trim(), year).await?)
    }
}
