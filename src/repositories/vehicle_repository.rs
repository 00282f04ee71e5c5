use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use super::mapping::{vehicle_to_domain, vehicle_to_persistence, VehicleRow};
use super::{VehicleStore, VEHICLES_TABLE};
use crate::clients::{Query, SupabaseRestClient};
use crate::models::Vehicle;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleRepository {
    client: SupabaseRestClient,
}

impl VehicleRepository {
    pub fn new(client: SupabaseRestClient) -> Self {
        Self { client }
    }
}

/// Primera fila devuelta por una escritura con `return=representation`
fn first_row(rows: Vec<VehicleRow>, id: Uuid) -> AppResult<Vehicle> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
    Ok(vehicle_to_domain(row)?)
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn create(&self, vehicle: &Vehicle, access_token: &str) -> AppResult<Vehicle> {
        let row = vehicle_to_persistence(vehicle);
        let rows: Vec<VehicleRow> = self
            .client
            .insert(VEHICLES_TABLE, &row, access_token)
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("Vehicle insert returned no rows".to_string()))?;
        Ok(vehicle_to_domain(row)?)
    }

    async fn find_by_id(&self, id: Uuid, access_token: &str) -> AppResult<Option<Vehicle>> {
        let row: Option<VehicleRow> = self
            .client
            .select_one(VEHICLES_TABLE, &Query::new().eq("id", id), access_token)
            .await?;

        Ok(row.map(vehicle_to_domain).transpose()?)
    }

    async fn list_by_user(&self, user_id: Uuid, access_token: &str) -> AppResult<Vec<Vehicle>> {
        let query = Query::new()
            .eq("user_id", user_id)
            .order("created_at", false);
        let rows: Vec<VehicleRow> = self.client.select(VEHICLES_TABLE, &query, access_token).await?;

        Ok(rows
            .into_iter()
            .map(vehicle_to_domain)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn update_mileage(
        &self,
        id: Uuid,
        mileage: u32,
        updated_at: DateTime<Utc>,
        access_token: &str,
    ) -> AppResult<Vehicle> {
        let changes = json!({ "mileage": mileage, "updated_at": updated_at });
        let rows: Vec<VehicleRow> = self
            .client
            .update(VEHICLES_TABLE, &Query::new().eq("id", id), &changes, access_token)
            .await?;

        first_row(rows, id)
    }

    async fn delete(&self, id: Uuid, access_token: &str) -> AppResult<()> {
        self.client
            .delete(VEHICLES_TABLE, &Query::new().eq("id", id), access_token)
            .await?;
        Ok(())
    }
}
