pub mod helpers;
pub mod tracing;

use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::{delete, get, post},
};
use nimbus_adapters::AllowedOrigins;
use nimbus_axum::{AppState, routes};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

pub use helpers::{StartupError, build_state, configure_postmark, configure_sqlite};

/// The weather app: HTML pages, the JSON API and static assets under `/static`.
pub struct WeatherAppService {
    router: Router,
}

impl WeatherAppService {
    pub fn new(state: AppState, assets_dir: &str) -> Self {
        let router = Router::new()
            .route("/", get(routes::index))
            .route(
                "/register",
                get(routes::register_page).post(routes::register),
            )
            .route("/login", get(routes::login_page).post(routes::login))
            .route("/logout", get(routes::logout))
            .route(
                "/dashboard",
                get(routes::dashboard).post(routes::search_dashboard),
            )
            .route("/verify-email/{token}", get(routes::verify_email))
            .route(
                "/forgot-password",
                get(routes::forgot_password_page).post(routes::forgot_password),
            )
            .route(
                "/reset-password/{token}",
                get(routes::reset_password_page).post(routes::reset_password),
            )
            .route("/api/favorite", post(routes::toggle_favorite))
            .route("/api/clear-history", delete(routes::clear_history))
            .route("/api/update-theme", post(routes::update_theme))
            .route("/api/update-language", post(routes::update_language))
            .route("/api/weather/{city}", get(routes::weather))
            .route("/api/account", delete(routes::delete_account))
            .nest_service("/static", ServeDir::new(assets_dir))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// The finished router, with CORS when origins are configured.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        ::tracing::info!("Weather app listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
