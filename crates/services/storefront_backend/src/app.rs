// --- File: crates/services/storefront_backend/src/app.rs ---
use axum::{routing::get, Router};
use http::HeaderValue;
use std::sync::Arc;
use storefront_common::services::ServiceFactory;
use storefront_config::AppConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
#[allow(unused_imports)] // only used by certain features
use tracing::{info, warn};

/// Builds the whole application: feature routers under `/api`, Swagger UI
/// when compiled with `openapi`, CORS and request tracing.
///
/// Routers of compiled features are always mounted; a feature switched off
/// at runtime answers 503 from its handlers.
#[allow(unused_variables)] // factory is unused without payment/chat
pub fn build_app(config: Arc<AppConfig>, factory: Arc<dyn ServiceFactory>) -> Router {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut router = Router::new()
        .route("/", get(|| async { "Welcome to the Storefront API!" }))
        .merge(storefront_common::routes());

    #[cfg(feature = "appointments")]
    {
        info!(
            "[Startup] appointments: {}",
            on_off(storefront_common::is_appointments_enabled(&config))
        );
        router = router.merge(storefront_appointments::routes::routes(config.clone()));
    }
    #[cfg(feature = "catalog")]
    {
        info!(
            "[Startup] catalog: {}",
            on_off(storefront_common::is_catalog_enabled(&config))
        );
        router = router.merge(storefront_catalog::routes::routes(config.clone()));
    }
    #[cfg(feature = "cart")]
    {
        info!(
            "[Startup] cart: {}",
            on_off(storefront_common::is_cart_enabled(&config))
        );
        router = router.merge(storefront_cart::routes::routes(config.clone()));
    }
    #[cfg(feature = "payment")]
    {
        info!(
            "[Startup] payment: {}",
            on_off(storefront_common::is_payment_enabled(&config))
        );
        router = router.merge(match factory.payment_service() {
            Some(service) => storefront_payment::routes::routes_with_service(config.clone(), service),
            None => storefront_payment::routes(config.clone()),
        });
    }
    #[cfg(feature = "chat")]
    {
        info!(
            "[Startup] chat: {}",
            on_off(storefront_common::is_chat_enabled(&config))
        );
        router = router.merge(match factory.realtime_store() {
            Some(store) => storefront_chat::routes::routes_with_store(config.clone(), store),
            None => storefront_chat::routes(config.clone()),
        });
    }

    #[allow(unused_mut)]
    let mut app = Router::new().nest("/api", router);

    #[cfg(feature = "openapi")]
    {
        info!("📖 Adding Swagger UI at /api/docs");
        app = app.merge(swagger_ui());
    }

    app.layer(cors_layer(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
}

#[allow(dead_code)]
fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

/// Any origin when the list is empty. Unparsable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!("[Startup] Ignoring invalid CORS origin '{}'", origin))
                .ok()
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use storefront_common::routes::HealthResponse;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Storefront API",
            version = "0.1.0",
            description = "Storefront Service API Docs",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        components(schemas(HealthResponse)),
        tags((name = "Storefront", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut openapi_doc = ApiDoc::openapi();
    #[cfg(feature = "appointments")]
    openapi_doc.merge(storefront_appointments::doc::AppointmentsApiDoc::openapi());
    #[cfg(feature = "catalog")]
    openapi_doc.merge(storefront_catalog::doc::CatalogApiDoc::openapi());
    #[cfg(feature = "cart")]
    openapi_doc.merge(storefront_cart::doc::CartApiDoc::openapi());
    #[cfg(feature = "payment")]
    openapi_doc.merge(storefront_payment::doc::PaymentApiDoc::openapi());
    #[cfg(feature = "chat")]
    openapi_doc.merge(storefront_chat::doc::ChatApiDoc::openapi());

    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
