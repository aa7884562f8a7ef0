use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use storefront_catalog::{CatalogError, ProductApi, SearchCoordinator};
use storefront_config::ApiConfig;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_secs: Some(5),
        page_size: Some(2),
        products_resource: None,
        appointments_resource: None,
        lists_resource: None,
        api_key: Some("k".to_string()),
    }
}

fn product(id: i64, name: &str, price: f64) -> Value {
    json!({ "id": id, "nombre": name, "precio": price })
}

#[tokio::test]
async fn test_list_maps_products_and_skips_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(header("authorization", "Bearer k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [product(1, "Café", 12.5), { "id": 2, "precio": 1.0 }],
            "total": 11
        })))
        .mount(&server)
        .await;

    let api = ProductApi::from_config(&api_config(&server), Some("EUR"));
    let page = api.list(2, 10).await.unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.total, Some(11));
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].formatted_price, "€12.50");
}

#[tokio::test]
async fn test_search_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .and(query_param("q", "te verde"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product(5, "Té verde", 3.0)])))
        .mount(&server)
        .await;

    let api = ProductApi::from_config(&api_config(&server), None);
    let items = api.search("  te verde ").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Té verde");

    assert!(matches!(
        api.search("   ").await,
        Err(CatalogError::InvalidQuery(_))
    ));
}

#[tokio::test]
async fn test_get_product_not_found_and_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/productos/500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = ProductApi::from_config(&api_config(&server), None);
    assert!(matches!(
        api.get_product("404").await,
        Err(CatalogError::NotFound(_))
    ));
    match api.get_product("500").await {
        Err(CatalogError::UpstreamStatus { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_all_follows_pages_until_short_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/listas"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }, { "id": 2 }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/listas"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 3 }])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ProductApi::from_config(&api_config(&server), None);
    let all: Vec<Value> = api.fetch_all("listas").await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2]["id"], 3);
}

#[tokio::test]
async fn test_newer_search_aborts_older_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .and(query_param("q", "caf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product(1, "Café", 1.0)]))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .and(query_param("q", "cafe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product(1, "Café", 1.0)])))
        .mount(&server)
        .await;

    let api = Arc::new(ProductApi::from_config(&api_config(&server), None));
    let coordinator = SearchCoordinator::new(api);

    let (older, newer) = tokio::join!(coordinator.search("s1", "caf".to_string()), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        coordinator.search("s1", "cafe".to_string()).await
    });

    assert!(matches!(older, Err(CatalogError::Cancelled)));
    assert_eq!(newer.unwrap().len(), 1);
    assert_eq!(coordinator.in_flight().await, 0);
}

#[tokio::test]
async fn test_searches_under_different_keys_do_not_interfere() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product(1, "Café", 1.0)]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let api = Arc::new(ProductApi::from_config(&api_config(&server), None));
    let coordinator = SearchCoordinator::new(api);
    let (a, b) = tokio::join!(
        coordinator.search("a", "cafe".to_string()),
        coordinator.search("b", "cafe".to_string())
    );
    assert!(a.is_ok());
    assert!(b.is_ok());
}
