//! Helpers compartidos por los tests de integración: stores en memoria,
//! clientes externos falsos y tokens firmados con el secreto de test.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use pocket_mechanic::clients::{
    AuthProvider, ClientError, ClientResult, MakeInfo, VinDecodeResult, VinDecoder,
};
use pocket_mechanic::config::EnvironmentConfig;
use pocket_mechanic::models::{
    AuthUser, Claims, MaintenanceTask, Session, SignUpOutcome, User, Vehicle,
};
use pocket_mechanic::repositories::{ProfileStore, TaskStore, VehicleStore};
use pocket_mechanic::utils::errors::{AppError, AppResult};
use pocket_mechanic::{create_router, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> EnvironmentConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SUPABASE_URL", "http://localhost:54321"),
        ("SUPABASE_ANON_KEY", "anon-key"),
        ("SUPABASE_JWT_SECRET", JWT_SECRET),
        ("DASHBOARD_TASK_LIMIT", "10"),
    ]);
    EnvironmentConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test config")
}

/// Access token válido para `user_id`
pub fn token_for(user_id: Uuid) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: Some("driver@example.com".to_string()),
        aud: "authenticated".to_string(),
        role: Some("authenticated".to_string()),
        exp: (now + Duration::hours(1)).timestamp() as usize,
        iat: Some(now.timestamp() as usize),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_ref()))
        .expect("token")
}

pub fn sample_vehicle(user_id: Uuid, mileage: u32, created_at: DateTime<Utc>) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        user_id,
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 2018,
        vin: None,
        trim: None,
        mileage,
        nickname: None,
        photo_url: None,
        created_at,
        updated_at: created_at,
    }
}

// ---------------------------------------------------------------------------
// Stores en memoria
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryVehicles {
    pub rows: Mutex<Vec<Vehicle>>,
}

#[async_trait]
impl VehicleStore for InMemoryVehicles {
    async fn create(&self, vehicle: &Vehicle, _access_token: &str) -> AppResult<Vehicle> {
        self.rows.lock().unwrap().push(vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_by_id(&self, id: Uuid, _access_token: &str) -> AppResult<Option<Vehicle>> {
        Ok(self.rows.lock().unwrap().iter().find(|v| v.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid, _access_token: &str) -> AppResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn update_mileage(
        &self,
        id: Uuid,
        mileage: u32,
        updated_at: DateTime<Utc>,
        _access_token: &str,
    ) -> AppResult<Vehicle> {
        let mut rows = self.rows.lock().unwrap();
        let vehicle = rows
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Vehicle".to_string()))?;
        vehicle.mileage = mileage;
        vehicle.updated_at = updated_at;
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: Uuid, _access_token: &str) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTasks {
    pub rows: Mutex<Vec<MaintenanceTask>>,
    pub fail_inserts: Mutex<bool>,
    pub failing_vehicles: Mutex<HashSet<Uuid>>,
}

#[async_trait]
impl TaskStore for InMemoryTasks {
    async fn insert_batch(&self, tasks: &[MaintenanceTask], _access_token: &str) -> AppResult<usize> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(AppError::ExternalApi("insert failed".to_string()));
        }
        self.rows.lock().unwrap().extend_from_slice(tasks);
        Ok(tasks.len())
    }

    async fn list_for_vehicle(&self, vehicle_id: Uuid, _access_token: &str) -> AppResult<Vec<MaintenanceTask>> {
        if self.failing_vehicles.lock().unwrap().contains(&vehicle_id) {
            return Err(AppError::ExternalApi("select failed".to_string()));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid, _access_token: &str) -> AppResult<Option<MaintenanceTask>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, task: &MaintenanceTask, _access_token: &str) -> AppResult<MaintenanceTask> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| AppError::NotFound("Maintenance task".to_string()))?;
        *row = task.clone();
        Ok(task.clone())
    }

    async fn delete_for_vehicle(&self, vehicle_id: Uuid, _access_token: &str) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|t| t.vehicle_id != vehicle_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    pub rows: Mutex<HashMap<Uuid, User>>,
    pub fail_creates: Mutex<bool>,
    /// Token usado en la última creación
    pub last_token: Mutex<Option<String>>,
}

#[async_trait]
impl ProfileStore for InMemoryProfiles {
    async fn find_by_id(&self, id: Uuid, _access_token: &str) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, user: &User, access_token: &str) -> AppResult<User> {
        *self.last_token.lock().unwrap() = Some(access_token.to_string());
        if *self.fail_creates.lock().unwrap() {
            return Err(AppError::ExternalApi("permission denied".to_string()));
        }
        self.rows.lock().unwrap().insert(user.id, user.clone());
        Ok(user.clone())
    }
}

// ---------------------------------------------------------------------------
// Clientes externos falsos
// ---------------------------------------------------------------------------

/// Servicio de autenticación falso: un único usuario registrado
pub struct FakeAuth {
    pub user_id: Uuid,
    pub email: String,
    pub password: String,
    pub confirmed: Mutex<bool>,
    pub auto_confirm: bool,
}

impl FakeAuth {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed: Mutex::new(true),
            auto_confirm: false,
        }
    }

    fn auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.user_id,
            email: Some(self.email.clone()),
            email_confirmed_at: None,
            created_at: None,
        }
    }

    fn session(&self) -> Session {
        Session {
            access_token: token_for(self.user_id),
            refresh_token: "refresh-token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at: None,
            user: self.auth_user(),
        }
    }
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(&self, email: &str, _password: &str) -> ClientResult<SignUpOutcome> {
        if email == self.email {
            return Err(api_error(422, "User already registered"));
        }
        Ok(SignUpOutcome {
            user: Some(AuthUser {
                email: Some(email.to_string()),
                ..self.auth_user()
            }),
            session: self.auto_confirm.then(|| self.session()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        if email != self.email || password != self.password {
            return Err(api_error(400, "Invalid login credentials"));
        }
        if !*self.confirmed.lock().unwrap() {
            return Err(api_error(400, "Email not confirmed"));
        }
        Ok(self.session())
    }

    async fn refresh_session(&self, refresh_token: &str) -> ClientResult<Session> {
        if refresh_token != "refresh-token" {
            return Err(api_error(400, "Invalid Refresh Token: Refresh Token Not Found"));
        }
        Ok(self.session())
    }

    async fn sign_out(&self, _access_token: &str) -> ClientResult<()> {
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> ClientResult<()> {
        Ok(())
    }

    async fn resend_verification(&self, _email: &str) -> ClientResult<()> {
        Ok(())
    }
}

/// Registro de VIN falso con un solo VIN conocido
pub struct FakeVin;

pub const KNOWN_VIN: &str = "1HGBH41JXMN109186";

#[async_trait]
impl VinDecoder for FakeVin {
    async fn decode_vin(&self, vin: &str) -> ClientResult<Option<VinDecodeResult>> {
        Ok((vin == KNOWN_VIN).then(|| VinDecodeResult {
            make: "HONDA".to_string(),
            model: "Civic".to_string(),
            year: 2021,
            trim: Some("EX".to_string()),
            vin: vin.to_string(),
        }))
    }

    async fn get_all_makes(&self) -> ClientResult<Vec<MakeInfo>> {
        Ok(vec![
            MakeInfo { make_id: 474, make_name: "HONDA".to_string() },
            MakeInfo { make_id: 448, make_name: "TOYOTA".to_string() },
        ])
    }

    async fn get_models_for_make_year(&self, make: &str, _year: i32) -> ClientResult<Vec<String>> {
        match make {
            "HONDA" => Ok(vec!["Civic".to_string(), "Accord".to_string()]),
            _ => Err(api_error(503, "")),
        }
    }
}

// ---------------------------------------------------------------------------
// App de test
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub auth: Arc<FakeAuth>,
    pub vehicles: Arc<InMemoryVehicles>,
    pub tasks: Arc<InMemoryTasks>,
    pub profiles: Arc<InMemoryProfiles>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_auth(FakeAuth::new("driver@example.com", "secret123"))
    }

    pub fn with_auth(auth: FakeAuth) -> Self {
        let auth = Arc::new(auth);
        let vehicles = Arc::new(InMemoryVehicles::default());
        let tasks = Arc::new(InMemoryTasks::default());
        let profiles = Arc::new(InMemoryProfiles::default());

        let state = AppState::from_parts(
            test_config(),
            auth.clone(),
            Arc::new(FakeVin),
            vehicles.clone(),
            tasks.clone(),
            profiles.clone(),
        );

        Self {
            router: create_router(state),
            auth,
            vehicles,
            tasks,
            profiles,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }
}
