//! Cliente REST del servicio de datos
//!
//! Habla el dialecto PostgREST: una ruta por tabla, filtros como parámetros
//! `columna=eq.valor` y cuerpos JSON con columnas snake_case. Cada llamada
//! reenvía el access token del usuario para que apliquen las políticas por
//! fila del backend.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use super::{error_from_response, ClientError, ClientResult};

/// Filtros, orden y límite de una consulta
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// `columna = valor`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Query string codificado, útil para logs y tests
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Cliente del servicio de datos
#[derive(Clone)]
pub struct SupabaseRestClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseRestClient {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str, access_token: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, table: &str) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let err = error_from_response(response).await;
            error!("❌ Data service error on '{}': {}", table, err);
            return Err(err);
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Decode(format!("{} rows: {}", table, e)))
    }

    /// SELECT * con filtros
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        access_token: &str,
    ) -> ClientResult<Vec<T>> {
        debug!("📥 select {}?{}", table, query.to_query_string());

        let request = self
            .request(Method::GET, table, access_token)
            .query(&[("select", "*")])
            .query(query.params());

        self.send(request, table).await
    }

    /// Primera fila que cumpla los filtros, si existe
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        access_token: &str,
    ) -> ClientResult<Option<T>> {
        let rows: Vec<T> = self.select(table, &query.clone().limit(1), access_token).await?;
        Ok(rows.into_iter().next())
    }

    /// INSERT de una o varias filas, devolviendo las filas creadas
    pub async fn insert<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        rows: &T,
        access_token: &str,
    ) -> ClientResult<Vec<R>> {
        debug!("📤 insert into {}", table);

        let request = self
            .request(Method::POST, table, access_token)
            .header("Prefer", "return=representation")
            .json(rows);

        self.send(request, table).await
    }

    /// UPDATE parcial de las filas que cumplan los filtros
    pub async fn update<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        changes: &T,
        access_token: &str,
    ) -> ClientResult<Vec<R>> {
        debug!("✏️ update {}?{}", table, query.to_query_string());

        let request = self
            .request(Method::PATCH, table, access_token)
            .header("Prefer", "return=representation")
            .query(query.params())
            .json(changes);

        self.send(request, table).await
    }

    /// DELETE de las filas que cumplan los filtros
    pub async fn delete(&self, table: &str, query: &Query, access_token: &str) -> ClientResult<()> {
        debug!("🗑️ delete from {}?{}", table, query.to_query_string());

        let response = self
            .request(Method::DELETE, table, access_token)
            .query(query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!("❌ Data service error on '{}': {}", table, err);
            return Err(err);
        }
        Ok(())
    }
}
