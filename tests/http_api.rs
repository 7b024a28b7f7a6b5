//! HttpRecipeApi against an in-process mock backend.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use recipebox::{
    ClientConfig, ClientError, Credentials, HttpRecipeApi, NewRecipe, RecipeApi, RecipeId,
    RecipeUpdate, UserId,
};

type Log = Arc<Mutex<Vec<(String, Value)>>>;

fn record(log: &Log, route: String, body: Value) {
    log.lock().unwrap().push((route, body));
}

async fn register(State(log): State<Log>, Json(body): Json<Value>) -> impl IntoResponse {
    record(&log, "POST /register".to_string(), body.clone());
    if body["username"] == "taken" {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "User already exists"})),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Registered", "user_id": 1})),
        )
    }
}

async fn login(State(log): State<Log>, Json(body): Json<Value>) -> impl IntoResponse {
    record(&log, "POST /login".to_string(), body.clone());
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Login success", "user_id": 7})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
    }
}

async fn recipes(State(log): State<Log>) -> Json<Value> {
    record(&log, "GET /recipes".to_string(), Value::Null);
    Json(json!([
        {"id": 2, "title": "Stew", "description": null, "image_base64": null, "owner": "bob"},
        {"id": 1, "title": "Soup", "description": "Hot", "image_base64": "data:image/png;base64,AA==", "owner": "alice"}
    ]))
}

async fn my_recipes(State(log): State<Log>, Path(user_id): Path<i64>) -> Json<Value> {
    record(&log, format!("GET /my_recipes/{}", user_id), Value::Null);
    Json(json!([{"id": 1, "title": "Soup", "description": "Hot", "image_base64": null}]))
}

async fn add_recipe(State(log): State<Log>, Json(body): Json<Value>) -> Json<Value> {
    record(&log, "POST /add_recipe".to_string(), body);
    Json(json!({"success": true, "message": "Recipe added", "id": 3}))
}

async fn edit_recipe(
    State(log): State<Log>,
    Path((id, user_id)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&log, format!("PUT /edit_recipe/{}/{}", id, user_id), body);
    if user_id != 7 {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"success": false, "message": "Not allowed"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "Recipe updated"})),
    )
}

async fn delete_recipe(State(log): State<Log>, Path((id, user_id)): Path<(i64, i64)>) -> StatusCode {
    record(&log, format!("DELETE /delete_recipe/{}/{}", id, user_id), Value::Null);
    StatusCode::OK
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn create_test_api() -> (HttpRecipeApi, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/recipes", get(recipes))
        .route("/my_recipes/:user_id", get(my_recipes))
        .route("/add_recipe", post(add_recipe))
        .route("/edit_recipe/:id/:user_id", put(edit_recipe))
        .route("/delete_recipe/:id/:user_id", delete(delete_recipe))
        .with_state(Arc::clone(&log));

    let base_url = spawn(router).await;
    let api = HttpRecipeApi::new(ClientConfig {
        base_url: format!("{}/", base_url),
        request_timeout_secs: 5,
    })
    .unwrap();

    (api, log)
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_and_duplicate() {
    let (api, log) = create_test_api().await;

    let reply = api.register(&credentials("alice", "pw")).await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Registered"));

    let err = api.register(&credentials("taken", "pw")).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("User already exists"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let log = log.lock().unwrap();
    assert_eq!(log[0].0, "POST /register");
    assert_eq!(log[0].1, json!({"username": "alice", "password": "pw"}));
}

#[tokio::test]
async fn test_login() {
    let (api, _log) = create_test_api().await;

    let reply = api.login(&credentials("alice", "secret")).await.unwrap();
    assert_eq!(reply.user_id, Some(UserId(7)));

    let err = api.login(&credentials("alice", "wrong")).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Invalid credentials"));
}

#[tokio::test]
async fn test_listings() {
    let (api, log) = create_test_api().await;

    let all = api.list_recipes().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].description, "");
    assert_eq!(all[1].owner.as_deref(), Some("alice"));

    let mine = api.list_user_recipes(UserId(7)).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, RecipeId(1));

    let routes: Vec<String> = log.lock().unwrap().iter().map(|(r, _)| r.clone()).collect();
    assert_eq!(routes, vec!["GET /recipes", "GET /my_recipes/7"]);
}

#[tokio::test]
async fn test_add_recipe_body() {
    let (api, log) = create_test_api().await;

    let reply = api
        .add_recipe(&NewRecipe {
            title: "Toast".to_string(),
            description: "Bread".to_string(),
            owner_id: UserId(7),
            image_base64: None,
        })
        .await
        .unwrap();
    assert_eq!(reply.id, Some(3));

    let log = log.lock().unwrap();
    assert_eq!(
        log[0].1,
        json!({"title": "Toast", "description": "Bread", "owner_id": 7, "image_base64": null})
    );
}

#[tokio::test]
async fn test_edit_addresses_recipe_and_owner() {
    let (api, log) = create_test_api().await;
    let update = RecipeUpdate {
        title: "Cold soup".to_string(),
        description: "Chilled".to_string(),
    };

    let reply = api.edit_recipe(RecipeId(1), UserId(7), &update).await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Recipe updated"));

    let err = api.edit_recipe(RecipeId(1), UserId(8), &update).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 403, .. }));

    let log = log.lock().unwrap();
    assert_eq!(log[0].0, "PUT /edit_recipe/1/7");
    assert_eq!(log[0].1, json!({"title": "Cold soup", "description": "Chilled"}));
    assert_eq!(log[1].0, "PUT /edit_recipe/1/8");
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let (api, log) = create_test_api().await;

    let reply = api.delete_recipe(RecipeId(4), UserId(7)).await.unwrap();
    assert_eq!(reply.message, None);
    assert_eq!(log.lock().unwrap()[0].0, "DELETE /delete_recipe/4/7");
}

#[tokio::test]
async fn test_non_json_listing_is_decode_error() {
    let router = Router::new().route("/recipes", get(|| async { "<html>oops</html>" }));
    let base_url = spawn(router).await;
    let api = HttpRecipeApi::new(ClientConfig {
        base_url,
        request_timeout_secs: 5,
    })
    .unwrap();

    let err = api.list_recipes().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpRecipeApi::new(ClientConfig {
        base_url: format!("http://{}", addr),
        request_timeout_secs: 5,
    })
    .unwrap();

    let err = api.list_recipes().await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable), "got {:?}", err);
}
