use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{self, create_usuario, list_ubicaciones, list_usuarios},
    state::AppState,
};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route("/ubicaciones", get(list_ubicaciones))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NuevoUsuario, Ubicacion, Usuario};
    use crate::services::{store::MockDocumentStore, StoreError};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router_with(store: MockDocumentStore) -> Router {
        create_router(AppState::new(Arc::new(store)))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_usuarios_store_failure_is_500() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_usuarios()
            .returning(|| Err(StoreError::connection("connection refused")));

        let (status, body) = send(router_with(store), get_request("/usuarios")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "connection refused" }));
    }

    #[tokio::test]
    async fn test_list_ubicaciones_store_failure_is_500() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list_ubicaciones()
            .returning(|| Err(StoreError::query("cursor killed")));

        let (status, body) = send(router_with(store), get_request("/ubicaciones")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "cursor killed" }));
    }

    #[tokio::test]
    async fn test_list_ubicaciones_passes_store_records_through() {
        let mut store = MockDocumentStore::new();
        store.expect_list_ubicaciones().returning(|| {
            Ok(vec![
                Ubicacion::new("a", 4.6, -74.08, "Bogota"),
                Ubicacion::new("b", "bad", "20", "Roto"),
            ])
        });

        let (status, body) = send(router_with(store), get_request("/ubicaciones")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "_id": "a", "Latitud": 4.6, "Longitud": -74.08, "Lugar": "Bogota" },
                { "_id": "b", "Latitud": "bad", "Longitud": "20", "Lugar": "Roto" }
            ])
        );
    }

    #[tokio::test]
    async fn test_create_usuario_insert_failure_is_500() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert_usuario()
            .times(1)
            .returning(|_| Err(StoreError::query("E11000 duplicate key error")));

        let payload = json!({ "User_id": 1, "Nombre": "Ana", "Telefono": "1", "Correo": "a@b.c" });
        let (status, body) = send(router_with(store), post_json("/usuarios", &payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "E11000 duplicate key error" }));
    }

    #[tokio::test]
    async fn test_create_usuario_invalid_payload_never_reaches_store() {
        let mut store = MockDocumentStore::new();
        store.expect_insert_usuario().never();

        let payload = json!({ "User_id": 1, "Nombre": "Ana", "Telefono": "1" });
        let (status, body) = send(router_with(store), post_json("/usuarios", &payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "Usuario validation failed: Correo: Path `Correo` is required." })
        );
    }

    #[tokio::test]
    async fn test_create_usuario_malformed_json_is_500() {
        let mut store = MockDocumentStore::new();
        store.expect_insert_usuario().never();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/usuarios")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let (status, body) = send(router_with(store), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_create_usuario_returns_201_with_store_record() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert_usuario()
            .withf(|nuevo: &NuevoUsuario| nuevo.user_id == 9 && nuevo.nombre == "Eva")
            .returning(|nuevo| Ok(nuevo.into_usuario("65f000000000000000000009".to_string())));

        let payload = json!({ "User_id": "9", "Nombre": "Eva", "Telefono": 300, "Correo": "e@x.co" });
        let (status, body) = send(router_with(store), post_json("/usuarios", &payload)).await;
        assert_eq!(status, StatusCode::CREATED);

        let usuario: Usuario = serde_json::from_value(body).unwrap();
        assert_eq!(usuario.id, "65f000000000000000000009");
        assert_eq!(usuario.telefono, "300");
    }
}
