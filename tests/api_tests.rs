mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{sample_vehicle, token_for, TestApp, KNOWN_VIN};
use pocket_mechanic::models::{Interval, MaintenanceCategory, MaintenanceTask, Priority};

fn new_vehicle_body(mileage: i64) -> Value {
    json!({
        "make": "Honda",
        "model": "Civic",
        "year": 2018,
        "mileage": mileage,
        "vin": "",
        "nickname": "Daily"
    })
}

/// Crea un vehículo por la API y devuelve su id
async fn create_vehicle(app: &TestApp, token: &str, mileage: i64) -> String {
    let (status, body) = app.post("/api/vehicles", Some(token), new_vehicle_body(mileage)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"]["vehicle"]["id"].as_str().unwrap().to_string()
}

fn titles(tasks: &Value) -> Vec<String> {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

fn task(vehicle_id: Uuid, title: &str, next_due_mileage: Option<u32>, next_due_date: Option<chrono::DateTime<Utc>>) -> MaintenanceTask {
    let now = Utc::now();
    MaintenanceTask {
        id: Uuid::new_v4(),
        vehicle_id,
        title: title.to_string(),
        description: String::new(),
        category: MaintenanceCategory::Other,
        interval: Interval::Mileage { miles: 5000 },
        last_completed_mileage: None,
        last_completed_date: None,
        next_due_mileage,
        next_due_date,
        is_overdue: false,
        priority: Priority::Medium,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_schedule_template() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/schedule/template", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 14);
    assert_eq!(items[0]["title"], "Oil Change");
    assert_eq!(items[0]["category"], "oil_change");
    assert_eq!(items[0]["intervalType"], "both");
    assert_eq!(items[0]["intervalMileage"], 5000);
    assert_eq!(items[0]["intervalMonths"], 6);
    assert_eq!(items[0]["priority"], "high");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/vehicles", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.get("/api/dashboard", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_vehicle_instantiates_schedule() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);

    let (status, body) = app.post("/api/vehicles", Some(&token), new_vehicle_body(50_000)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tasksCreated"], 14);
    assert_eq!(body["data"]["scheduleCreated"], true);
    assert!(body["data"].get("warning").is_none());

    let vehicle = &body["data"]["vehicle"];
    assert_eq!(vehicle["userId"], user_id.to_string());
    assert_eq!(vehicle["mileage"], 50_000);
    assert_eq!(vehicle["vin"], Value::Null);
    assert_eq!(vehicle["nickname"], "Daily");

    let tasks = app.tasks.rows.lock().unwrap().clone();
    assert_eq!(tasks.len(), 14);
    assert!(tasks.iter().all(|t| !t.is_overdue));

    let oil = tasks.iter().find(|t| t.title == "Oil Change").unwrap();
    assert_eq!(oil.next_due_mileage, Some(55_000));
    assert!(oil.next_due_date.is_some());

    let wipers = tasks.iter().find(|t| t.title == "Wiper Blade Replacement").unwrap();
    assert_eq!(wipers.next_due_mileage, None);
    assert_eq!(wipers.next_due_date, Some(wipers.created_at + Duration::days(360)));
}

#[tokio::test]
async fn test_create_vehicle_keeps_vehicle_when_schedule_fails() {
    let app = TestApp::new();
    *app.tasks.fail_inserts.lock().unwrap() = true;
    let token = token_for(Uuid::new_v4());

    let (status, body) = app.post("/api/vehicles", Some(&token), new_vehicle_body(1_000)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scheduleCreated"], false);
    assert_eq!(body["data"]["tasksCreated"], 0);
    assert!(body["data"]["warning"].as_str().unwrap().contains("maintenance schedule"));
    assert_eq!(app.vehicles.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_vehicle_validation() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app
        .post(
            "/api/vehicles",
            Some(&token),
            json!({ "make": " ", "model": "Civic", "year": 1800, "mileage": -5, "vin": "ABC" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    for field in ["make", "year", "mileage", "vin"] {
        assert!(body["details"].get(field).is_some(), "missing {}", field);
    }
    assert!(app.vehicles.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_vehicle_body_is_validation_error() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app
        .post(
            "/api/vehicles",
            Some(&token),
            json!({ "make": "Honda", "model": "Civic", "year": 2018 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["mileage"].is_array(), "{}", body);

    let (status, body) = app
        .post(
            "/api/vehicles",
            Some(&token),
            json!({ "make": "Honda", "model": "Civic", "year": 2018, "mileage": "42000" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"].is_object());

    let id = create_vehicle(&app, &token, 42_000).await;
    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/vehicles/{}/mileage", id),
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["mileage"].is_array(), "{}", body);
    assert_eq!(app.vehicles.rows.lock().unwrap()[0].mileage, 42_000);
}

#[tokio::test]
async fn test_invalid_path_ids_are_validation_errors() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app.get("/api/vehicles/not-a-uuid", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["id"].is_array(), "{}", body);

    let id = create_vehicle(&app, &token, 42_000).await;
    let (status, body) = app
        .post(
            &format!("/api/vehicles/{}/tasks/oil-change/complete", id),
            Some(&token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["taskId"].is_array(), "{}", body);

    let (status, body) = app.get("/api/vin/makes/HONDA/models/recent", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["year"].is_array(), "{}", body);
}

#[tokio::test]
async fn test_vehicle_ownership() {
    let app = TestApp::new();
    let owner = token_for(Uuid::new_v4());
    let other = token_for(Uuid::new_v4());
    let id = create_vehicle(&app, &owner, 20_000).await;

    let (status, body) = app.get(&format!("/api/vehicles/{}", id), Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let (status, body) = app.get(&format!("/api/vehicles/{}", id), Some(&other)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = app.get(&format!("/api/vehicles/{}", Uuid::new_v4()), Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/api/vehicles", Some(&other)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_mileage_reclassifies_tasks() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());
    let id = create_vehicle(&app, &token, 50_000).await;

    let (status, body) = app.get(&format!("/api/vehicles/{}/tasks", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["overdue"].as_array().unwrap().is_empty());
    assert_eq!(titles(&body["data"]["upcoming"])[0], "Oil Change");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/vehicles/{}/mileage", id),
            Some(&token),
            Some(json!({ "mileage": 55_500 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["mileage"], 55_500);

    let (_, body) = app.get(&format!("/api/vehicles/{}/tasks", id), Some(&token)).await;
    assert_eq!(body["data"]["currentMileage"], 55_500);
    assert_eq!(titles(&body["data"]["overdue"]), vec!["Oil Change"]);
    assert_eq!(body["data"]["overdue"][0]["isOverdue"], true);
    assert_eq!(titles(&body["data"]["upcoming"])[0], "Tire Rotation");
}

#[tokio::test]
async fn test_update_mileage_rejects_negative() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());
    let id = create_vehicle(&app, &token, 100).await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/vehicles/{}/mileage", id),
            Some(&token),
            Some(json!({ "mileage": -1 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("mileage").is_some());
}

#[tokio::test]
async fn test_complete_task_rederives_due_values() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());
    let id = create_vehicle(&app, &token, 50_000).await;
    let oil_id = app
        .tasks
        .rows
        .lock()
        .unwrap()
        .iter()
        .find(|t| t.title == "Oil Change")
        .unwrap()
        .id;

    let (status, body) = app
        .post(
            &format!("/api/vehicles/{}/tasks/{}/complete", id, oil_id),
            Some(&token),
            json!({ "mileage": 55_500 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lastCompletedMileage"], 55_500);
    assert_eq!(body["data"]["nextDueMileage"], 60_500);
    assert_eq!(body["data"]["isOverdue"], false);

    // Sin odómetro explícito se usa el del vehículo
    let (_, body) = app
        .post(&format!("/api/vehicles/{}/tasks/{}/complete", id, oil_id), Some(&token), json!({}))
        .await;
    assert_eq!(body["data"]["nextDueMileage"], 55_000);

    let (status, _) = app
        .post(
            &format!("/api/vehicles/{}/tasks/{}/complete", id, Uuid::new_v4()),
            Some(&token),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_vehicle_removes_tasks() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());
    let id = create_vehicle(&app, &token, 10_000).await;
    assert_eq!(app.tasks.rows.lock().unwrap().len(), 14);

    let (status, body) = app
        .request(Method::DELETE, &format!("/api/vehicles/{}", id), Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(app.tasks.rows.lock().unwrap().is_empty());
    assert!(app.vehicles.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_orders_and_splits_tasks() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);
    let now = Utc::now();

    let older = sample_vehicle(user_id, 60_000, now - Duration::days(30));
    let newer = sample_vehicle(user_id, 10_000, now - Duration::days(1));
    app.vehicles.rows.lock().unwrap().extend([older.clone(), newer.clone()]);
    app.tasks.rows.lock().unwrap().extend([
        task(newer.id, "Upcoming by mileage", Some(15_000), None),
        task(newer.id, "Overdue by date", None, Some(now - Duration::days(2))),
        task(older.id, "Overdue by mileage", Some(55_000), None),
        task(older.id, "Nothing due", None, None),
    ]);

    let (status, body) = app.get("/api/dashboard", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["primaryVehicle"]["id"], newer.id.to_string());
    assert_eq!(data["vehicles"].as_array().unwrap().len(), 2);
    assert_eq!(titles(&data["overdueTasks"]), vec!["Overdue by mileage", "Overdue by date"]);
    assert_eq!(titles(&data["upcomingTasks"]), vec!["Upcoming by mileage", "Nothing due"]);
    assert_eq!(data["mostUrgentTask"]["title"], "Overdue by mileage");
}

#[tokio::test]
async fn test_dashboard_limits_tasks_and_survives_failed_fetch() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());
    let first = create_vehicle(&app, &token, 1_000).await;
    create_vehicle(&app, &token, 2_000).await;

    let (_, body) = app.get("/api/dashboard", Some(&token)).await;
    let data = &body["data"];
    let total = data["overdueTasks"].as_array().unwrap().len() + data["upcomingTasks"].as_array().unwrap().len();
    assert_eq!(total, 10);

    app.tasks
        .failing_vehicles
        .lock()
        .unwrap()
        .insert(Uuid::parse_str(&first).unwrap());

    let (status, body) = app.get("/api/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let upcoming = body["data"]["upcomingTasks"].as_array().unwrap();
    assert!(upcoming.iter().all(|t| t["vehicleId"] != first.as_str()));
}

#[tokio::test]
async fn test_dashboard_without_vehicles() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app.get("/api/dashboard", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["primaryVehicle"], Value::Null);
    assert_eq!(body["data"]["mostUrgentTask"], Value::Null);
}

#[tokio::test]
async fn test_sign_up_creates_profile() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/sign-up",
            None,
            json!({ "email": "new@example.com", "password": "secret123", "confirmPassword": "secret123" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["emailConfirmationRequired"], true);
    assert_eq!(body["data"]["user"]["email"], "new@example.com");
    assert_eq!(body["data"]["user"]["isPremium"], false);
    assert_eq!(app.profiles.rows.lock().unwrap().len(), 1);
    // Sin sesión el perfil se inserta con la clave anónima
    assert_eq!(app.profiles.last_token.lock().unwrap().as_deref(), Some("anon-key"));
}

#[tokio::test]
async fn test_sign_up_validation() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/sign-up",
            None,
            json!({ "email": "new@example.com", "password": "secret123", "confirmPassword": "different" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("confirmPassword").is_some());

    let (status, body) = app
        .post(
            "/api/auth/sign-up",
            None,
            json!({ "email": "not-an-email", "password": "123", "confirmPassword": "123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("email").is_some());
    assert!(body["details"].get("password").is_some());

    let (status, body) = app
        .post(
            "/api/auth/sign-up",
            None,
            json!({ "email": "new@example.com", "password": "secret123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["confirmPassword"].is_array(), "{}", body);
    assert!(app.profiles.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_up_existing_user() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/sign-up",
            None,
            json!({ "email": "driver@example.com", "password": "secret123", "confirmPassword": "secret123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already registered");
}

#[tokio::test]
async fn test_sign_in() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/auth/sign-in", None, json!({ "email": "driver@example.com", "password": "secret123" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["session"]["access_token"].is_string());

    let (status, body) = app
        .post("/api/auth/sign-in", None, json!({ "email": "driver@example.com", "password": "wrong-password" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid login credentials");
}

#[tokio::test]
async fn test_sign_in_email_not_confirmed() {
    let app = TestApp::new();
    *app.auth.confirmed.lock().unwrap() = false;

    let (status, body) = app
        .post("/api/auth/sign-in", None, json!({ "email": "driver@example.com", "password": "secret123" }))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "EMAIL_NOT_CONFIRMED");
}

#[tokio::test]
async fn test_refresh_and_sign_out() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/auth/refresh", None, json!({ "refreshToken": "refresh-token" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["session"]["access_token"].as_str().unwrap().to_string();

    let (status, _) = app.post("/api/auth/refresh", None, json!({ "refreshToken": "stale" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.request(Method::POST, "/api/auth/sign-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_password_reset_and_resend_validate_email() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/api/auth/reset-password", None, json!({ "email": "driver@example.com" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/api/auth/resend-verification", None, json!({ "email": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("email").is_some());
}

#[tokio::test]
async fn test_me_creates_missing_profile() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.to_string());
    assert_eq!(body["data"]["email"], "driver@example.com");
    assert!(app.profiles.rows.lock().unwrap().contains_key(&user_id));
}

#[tokio::test]
async fn test_me_falls_back_when_profile_creation_fails() {
    let app = TestApp::new();
    *app.profiles.fail_creates.lock().unwrap() = true;
    let user_id = Uuid::new_v4();

    let (status, body) = app.get("/api/auth/me", Some(&token_for(user_id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.to_string());
    assert_eq!(body["data"]["isPremium"], false);
    assert!(app.profiles.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_vin_decode() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app
        .get(&format!("/api/vin/decode/{}", KNOWN_VIN.to_lowercase()), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["make"], "HONDA");
    assert_eq!(body["data"]["year"], 2021);

    let (status, body) = app.get("/api/vin/decode/2T1BURHE0JC074231", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Could not decode VIN. Please enter manually.");

    let (status, body) = app.get("/api/vin/decode/SHORTVIN", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("vin").is_some());
}

#[tokio::test]
async fn test_vin_makes_and_models() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4());

    let (status, body) = app.get("/api/vin/makes", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["makeName"], "HONDA");

    let (status, body) = app.get("/api/vin/makes/HONDA/models/2020", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["Civic", "Accord"]));

    // Fallo remoto sin mensaje: mensaje genérico
    let (status, body) = app.get("/api/vin/makes/FORD/models/2020", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Something went wrong. Please try again.");

    let (status, _) = app.get("/api/vin/makes/HONDA/models/1700", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
