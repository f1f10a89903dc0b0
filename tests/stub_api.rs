//! End-to-end tests driving the real REST client against an in-process
//! stub of the remote API.

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, web};

use agrovista_web::api::{CatalogReader, ProductListQuery, RestClient};
use agrovista_web::cache::{CacheKey, CachedValue, QueryCache};
use agrovista_web::domain::inquiry::Inquiry;
use agrovista_web::domain::types::ProductId;
use agrovista_web::forms::inquiry::InquiryForm;
use agrovista_web::services::ServiceError;
use agrovista_web::services::inquiry::{
    CONTACT_SUCCESS_DISMISS_MS, SubmissionOutcome, delete_inquiry, list_inquiries,
    submit_contact_inquiry,
};

/// Spawns a stub API on an ephemeral port and returns a client pointed at it.
async fn spawn_stub(
    configure: impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
) -> RestClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should bind an ephemeral port");
    let addr = listener.local_addr().expect("listener should have an address");

    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .listen(listener)
        .expect("stub server should listen")
        .workers(1)
        .run();
    actix_web::rt::spawn(server);

    RestClient::new(format!("http://{addr}"))
}

fn inquiry(id: &str, name: &str) -> Inquiry {
    Inquiry {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        ..Inquiry::default()
    }
}

#[actix_rt::test]
async fn enveloped_and_bare_listings_normalize_identically() {
    let api = spawn_stub(|cfg| {
        cfg.route(
            "/products",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({
                    "data": [
                        {"id": "p-1", "name": "Power Weeder"},
                        {"id": "p-2", "name": "Sprayer"}
                    ]
                }))
            }),
        )
        .route(
            "/product-categories",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!([
                    {"id": "c-1", "name": "Weeders"}
                ]))
            }),
        );
    })
    .await;

    let products = api
        .list_products(&ProductListQuery::default())
        .await
        .expect("enveloped listing should decode");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Power Weeder");

    let categories = api
        .list_categories()
        .await
        .expect("bare listing should decode");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Weeders");
}

#[actix_rt::test]
async fn missing_product_maps_to_none() {
    let api = spawn_stub(|cfg| {
        cfg.route(
            "/products/{id}",
            web::get().to(|id: web::Path<String>| async move {
                if id.as_str() == "p-1" {
                    HttpResponse::Ok().json(serde_json::json!({
                        "data": {"id": "p-1", "name": "Power Weeder"}
                    }))
                } else {
                    HttpResponse::NotFound().json(serde_json::json!({"error": "no such product"}))
                }
            }),
        );
    })
    .await;

    let found = api
        .get_product(&ProductId::new("p-1").expect("valid id"))
        .await
        .expect("fetch should succeed");
    assert_eq!(found.expect("product should exist").name, "Power Weeder");

    let missing = api
        .get_product(&ProductId::new("p-404").expect("valid id"))
        .await
        .expect("404 should not be an error");
    assert!(missing.is_none());
}

#[actix_rt::test]
async fn contact_submission_posts_the_wire_payload() {
    let captured = web::Data::new(Mutex::new(Vec::<serde_json::Value>::new()));
    let captured_for_stub = captured.clone();

    let api = spawn_stub(move |cfg| {
        cfg.app_data(captured_for_stub.clone()).route(
            "/inquiry",
            web::post().to(
                |body: web::Json<serde_json::Value>,
                 captured: web::Data<Mutex<Vec<serde_json::Value>>>| async move {
                    captured
                        .lock()
                        .expect("capture lock should not be poisoned")
                        .push(body.into_inner());
                    HttpResponse::Created().json(serde_json::json!({"data": {"id": "i-1"}}))
                },
            ),
        );
    })
    .await;

    let cache = QueryCache::default();
    let form = InquiryForm {
        fullname: "  Jane Doe ".to_string(),
        phonenumber: "9999999999".to_string(),
        email: "JANE@Example.COM".to_string(),
        description: "Need a quote".to_string(),
    };

    let outcome = submit_contact_inquiry(form, &api, &cache).await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Succeeded {
            dismiss_after_ms: CONTACT_SUCCESS_DISMISS_MS
        }
    );

    let captured = captured.lock().expect("capture lock should not be poisoned");
    assert_eq!(
        *captured,
        vec![serde_json::json!({
            "name": "Jane Doe",
            "phone_number": "9999999999",
            "email": "jane@example.com",
            "message": "Need a quote"
        })]
    );
}

#[actix_rt::test]
async fn expired_token_maps_to_unauthorized() {
    let api = spawn_stub(|cfg| {
        cfg.route(
            "/inquiry",
            web::get().to(|| async {
                HttpResponse::Unauthorized().json(serde_json::json!({
                    "code": "unauthorized",
                    "error": "token expired"
                }))
            }),
        );
    })
    .await;

    let cache = QueryCache::default();
    let result = list_inquiries(&api.with_bearer("stale-token"), &cache).await;
    assert!(matches!(result, Err(ServiceError::Unauthorized)));
}

#[actix_rt::test]
async fn failed_delete_restores_the_cached_list_verbatim() {
    let api = spawn_stub(|cfg| {
        cfg.route(
            "/inquiry/{id}",
            web::delete().to(|| async {
                HttpResponse::InternalServerError().json(serde_json::json!({"error": "db down"}))
            }),
        );
    })
    .await;

    let cache = QueryCache::default();
    let original = vec![inquiry("i-1", "Jane"), inquiry("i-2", "John")];
    cache.put(CacheKey::Inquiries, CachedValue::Inquiries(original.clone()));

    let result = delete_inquiry("i-1", &api, &cache).await;
    assert!(matches!(result, Err(ServiceError::Api(_))));

    // Rollback restores exactly what was cached before the optimistic edit.
    assert_eq!(
        cache.peek(&CacheKey::Inquiries),
        Some(CachedValue::Inquiries(original))
    );
    // The failed mutation still leaves the list stale for the next read.
    assert!(cache.get(&CacheKey::Inquiries).is_none());
}

#[actix_rt::test]
async fn successful_delete_drops_the_row_and_marks_the_list_stale() {
    let api = spawn_stub(|cfg| {
        cfg.route(
            "/inquiry/{id}",
            web::delete().to(|| async { HttpResponse::NoContent().finish() }),
        );
    })
    .await;

    let cache = QueryCache::default();
    cache.put(
        CacheKey::Inquiries,
        CachedValue::Inquiries(vec![inquiry("i-1", "Jane"), inquiry("i-2", "John")]),
    );

    delete_inquiry("i-1", &api, &cache).await.expect("delete should succeed");

    match cache.peek(&CacheKey::Inquiries) {
        Some(CachedValue::Inquiries(remaining)) => {
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].id.as_deref(), Some("i-2"));
        }
        other => panic!("expected a cached inquiry list, got {other:?}"),
    }
    assert!(cache.get(&CacheKey::Inquiries).is_none());
}
