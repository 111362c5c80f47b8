//! Bistro Server
//!
//! Production server for the restaurant-ordering REST API:
//! - Public APIs: menu, reviews, cart, payment intents
//! - Customer APIs: checkout, payment history (token required)
//! - Admin APIs: user management, menu management, analytics
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BISTRO_API_PORT` | `5000` | HTTP API port |
//! | `BISTRO_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `BISTRO_MONGO_DB` | `bistroDB` | MongoDB database name |
//! | `BISTRO_JWT_SECRET` | - | HMAC secret for token signing (required) |
//! | `BISTRO_JWT_ISSUER` | `bistro` | JWT issuer claim |
//! | `STRIPE_SECRET_KEY` | - | Payment processor API key (required) |
//! | `STRIPE_API_BASE` | `https://api.stripe.com` | Processor API base URL |
//! | `RUST_LOG` | `info` | Log level |
//! | `LOG_FORMAT` | `text` | `json` for structured output |

use std::sync::Arc;

use anyhow::{bail, Result};
use axum::Router;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use bistro_platform::api::{
    cart_router, health_router, menu_router, payments_router, reviews_router, stats_router,
    token_router, users_router, AppState, AuthLayer, CartState, HealthState, MenuState,
    PaymentState, ReviewState, StatsState, TokenState, UsersState,
};
use bistro_platform::{
    AuthConfig, AuthService, CartRepository, CheckoutService, MenuRepository, PasswordService,
    PaymentRepository, ReviewRepository, StatsRepository, StripeClient, UserRepository,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    bistro_common::logging::init_logging("bistro-server");

    info!("Starting Bistro Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("BISTRO_API_PORT", 5000);
    let mongo_url = env_or("BISTRO_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("BISTRO_MONGO_DB", "bistroDB");
    let jwt_issuer = env_or("BISTRO_JWT_ISSUER", "bistro");

    let jwt_secret = match std::env::var("BISTRO_JWT_SECRET") {
        Ok(s) if !s.is_empty() => s,
        _ => bail!("BISTRO_JWT_SECRET must be set"),
    };
    let stripe_key = match std::env::var("STRIPE_SECRET_KEY") {
        Ok(s) if !s.is_empty() => s,
        _ => bail!("STRIPE_SECRET_KEY must be set"),
    };

    // Connect to MongoDB
    info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
    let db = mongo_client.database(&mongo_db);

    // Initialize repositories
    let user_repo = Arc::new(UserRepository::new(&db));
    let menu_repo = Arc::new(MenuRepository::new(&db));
    let review_repo = Arc::new(ReviewRepository::new(&db));
    let cart_repo = Arc::new(CartRepository::new(&db));
    let payment_repo = Arc::new(PaymentRepository::new(&db));
    let stats_repo = Arc::new(StatsRepository::new(&db));
    info!("Repositories initialized");

    // Initialize services
    let auth_service = Arc::new(AuthService::new(AuthConfig {
        secret_key: jwt_secret,
        issuer: jwt_issuer,
        ..AuthConfig::default()
    }));
    let password_service = Arc::new(PasswordService::default());
    let stripe = match std::env::var("STRIPE_API_BASE") {
        Ok(base) if !base.is_empty() => Arc::new(StripeClient::with_api_base(stripe_key, base)),
        _ => Arc::new(StripeClient::new(stripe_key)),
    };
    let checkout = Arc::new(CheckoutService::new(
        mongo_client.clone(),
        PaymentRepository::new(&db),
        CartRepository::new(&db),
    ));
    info!("Services initialized");

    // Create AppState for the auth extractors
    let app_state = AppState {
        auth_service: auth_service.clone(),
        user_repo: user_repo.clone(),
    };

    // Build API states
    let token_state = TokenState {
        auth_service,
        password_service: password_service.clone(),
        user_repo: user_repo.clone(),
    };
    let users_state = UsersState {
        user_repo: user_repo.clone(),
        password_service,
    };
    let menu_state = MenuState {
        menu_repo: menu_repo.clone(),
    };
    let review_state = ReviewState { review_repo };
    let cart_state = CartState { cart_repo };
    let payment_state = PaymentState {
        stripe,
        checkout,
        payment_repo: payment_repo.clone(),
    };
    let stats_state = StatsState {
        user_repo,
        menu_repo,
        payment_repo,
        stats_repo,
    };

    // Build API router using OpenApiRouter for auto-collected OpenAPI paths
    let (router, mut openapi) = OpenApiRouter::new()
        .nest("/jwt", token_router(token_state))
        .nest("/users", users_router(users_state))
        .nest("/menu", menu_router(menu_state))
        .nest("/reviews", reviews_router(review_state))
        .nest("/cart", cart_router(cart_state))
        // create-payment-intent, payments, order-stats, admin-stats live at the root
        .merge(payments_router(payment_state))
        .merge(stats_router(stats_state))
        .split_for_parts();

    openapi.info.title = "Bistro API".to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi.info.description =
        Some("REST APIs for the restaurant ordering frontend".to_string());

    let app = Router::new()
        .merge(router)
        .merge(health_router(HealthState { db }))
        // OpenAPI / Swagger UI with auto-collected paths
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", openapi))
        // Auth middleware
        .layer(AuthLayer::new(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start API server
    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let listener = TcpListener::bind(&api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Bistro Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
