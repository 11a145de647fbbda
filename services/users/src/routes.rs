//! Account service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiPath, ApiQuery},
    models::{
        ActionQuery, AuthenticateResponse, CredentialsRequest, ListKind, MessageResponse,
        MovieRef, UpdatePasswordRequest,
    },
    state::AppState,
};

/// Create the router for the account service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(get_users).post(register_or_authenticate))
        .route("/users/:user_name", put(change_password))
        .route("/users/:user_name/:list", get(get_list).post(update_list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "users-service"
    }))
}

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.accounts.list_users().await?;
    Ok(Json(users))
}

/// Register with `?action=register`, authenticate otherwise
pub async fn register_or_authenticate(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ActionQuery>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> ApiResult<axum::response::Response> {
    let username = payload.username.as_deref();
    let password = payload.password.as_deref();

    if query.is("register") {
        info!("Registration attempt for user: {:?}", username);
        state.accounts.register(username, password).await?;
        return Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new(201, "Successfully created new user.")),
        )
            .into_response());
    }

    info!("Login attempt for user: {:?}", username);
    let token = state.accounts.authenticate(username, password).await?;
    Ok((
        StatusCode::OK,
        Json(AuthenticateResponse {
            success: true,
            token,
        }),
    )
        .into_response())
}

/// Change a user's password
pub async fn change_password(
    State(state): State<AppState>,
    ApiPath(user_name): ApiPath<String>,
    ApiJson(payload): ApiJson<UpdatePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .accounts
        .change_password(&user_name, payload.password.as_deref())
        .await?;

    Ok(Json(MessageResponse::new(200, "User updated successfully")))
}

/// Add (default) or remove (`?action=remove`) a movie; responds with the list
pub async fn update_list(
    State(state): State<AppState>,
    ApiPath((user_name, list)): ApiPath<(String, ListKind)>,
    ApiQuery(query): ApiQuery<ActionQuery>,
    ApiJson(movie): ApiJson<MovieRef>,
) -> ApiResult<impl IntoResponse> {
    if query.is("remove") {
        let movies = state
            .accounts
            .remove_movie(&user_name, list, &movie.id)
            .await?;
        return Ok((StatusCode::OK, Json(movies)));
    }

    let movies = state.accounts.add_movie(&user_name, list, &movie).await?;
    Ok((StatusCode::CREATED, Json(movies)))
}

/// Read one of a user's lists
pub async fn get_list(
    State(state): State<AppState>,
    ApiPath((user_name, list)): ApiPath<(String, ListKind)>,
) -> ApiResult<impl IntoResponse> {
    let movies = state.accounts.list_movies(&user_name, list).await?;
    Ok(Json(movies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        accounts::AccountService,
        jwt::{JwtConfig, JwtService},
        models::UserResponse,
        repositories::MemoryUserRepository,
    };
    use axum::{
        body::Body,
        http::{Method, Request, header},
    };
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let jwt = JwtService::new(JwtConfig {
            secret: "router-secret".to_string(),
        });
        let accounts = AccountService::new(Arc::new(MemoryUserRepository::new()), jwt);
        create_router(AppState { accounts })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn parse<T: DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn end_to_end_favourites_flow() {
        let app = app();
        let credentials = json!({"username": "alice", "password": "Abcdef1!"});

        let (status, body) = send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(credentials.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["code"], 201);

        let (status, body) = send(&app, Method::POST, "/users", Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        let auth: AuthenticateResponse = parse(body);
        assert!(auth.success);
        assert!(auth.token.starts_with("BEARER "));

        let movie = json!({"id": 5, "title": "The Fifth Element"});
        let (status, body) = send(
            &app,
            Method::POST,
            "/users/alice/favourites",
            Some(movie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!([movie]));

        let (status, body) = send(
            &app,
            Method::POST,
            "/users/alice/favourites?action=add",
            Some(json!({"id": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            Method::POST,
            "/users/alice/favourites?action=remove",
            Some(json!({"id": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(&app, Method::GET, "/users/alice/favourites", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn error_kinds_have_distinct_statuses() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(json!({"username": "bob"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (status, _) = send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(json!({"username": "bob", "password": "Abcdefgh!"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let credentials = json!({"username": "bob", "password": "Abcdef1!"});
        send(&app, Method::POST, "/users?action=register", Some(credentials.clone())).await;
        let (status, _) = send(&app, Method::POST, "/users?action=register", Some(credentials)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({"username": "bob", "password": "Wrong1!x"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("token").is_none());

        let (status, _) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({"username": "nobody", "password": "Abcdef1!"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn password_update_and_user_listing() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(json!({"username": "carol", "password": "Abcdef1!"})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/users/carol",
            Some(json!({"password": "Changed9$"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 200);

        let (status, _) = send(&app, Method::PUT, "/users/carol", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users/ghost",
            Some(json!({"password": "Changed9$"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({"username": "carol", "password": "Changed9$"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body[0].get("password_hash").is_none());
        let users: Vec<UserResponse> = parse(body);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "carol");
    }

    #[tokio::test]
    async fn mustwatch_mirrors_favourites() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(json!({"username": "dave", "password": "Abcdef1!"})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/users/dave/mustwatch",
            Some(json!({"id": 11, "title": "Star Wars"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body[0]["id"], 11);

        let (_, favourites) = send(&app, Method::GET, "/users/dave/favourites", None).await;
        assert_eq!(favourites, json!([]));

        let (status, _) = send(&app, Method::GET, "/users/erin/mustwatch", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::POST,
            "/users/erin/mustwatch?action=remove",
            Some(json!({"id": 11})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    async fn send_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_requests_get_code_and_msg() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(json!({"username": "frank", "password": "Abcdef1!"})),
        )
        .await;

        let (status, body) = send_raw(&app, "/users", None, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert!(body["msg"].is_string());

        let (status, body) = send_raw(&app, "/users", Some("application/json"), "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (status, body) = send_raw(
            &app,
            "/users/frank/favourites",
            Some("application/json"),
            r#"{"title": "no id"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);

        let (status, body) = send_raw(
            &app,
            "/users/frank/watchlist",
            Some("application/json"),
            r#"{"id": 5}"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);

        let (status, body) = send(&app, Method::GET, "/users/frank/watchlist", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn non_integer_movie_ids_pass_through() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/users?action=register",
            Some(json!({"username": "grace", "password": "Abcdef1!"})),
        )
        .await;

        let movie = json!({"id": "tt0137523", "title": "Fight Club"});
        let (status, body) = send(
            &app,
            Method::POST,
            "/users/grace/favourites",
            Some(movie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!([movie]));

        let (status, body) = send(
            &app,
            Method::POST,
            "/users/grace/favourites",
            Some(json!({"id": 5.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            Method::POST,
            "/users/grace/favourites?action=remove",
            Some(json!({"id": "tt0137523"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 5.0}]));
    }
}
