use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use boxoffice_server::config::Config;
use boxoffice_server::mailer::Mailer;
use boxoffice_server::routes::create_router;
use boxoffice_server::state::AppState;
use boxoffice_server::store::PgTicketStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Invalid configuration");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let mailer = match &config.mail {
        Some(mail) => {
            let mailer = Mailer::new(mail).expect("Invalid mail configuration");
            tracing::info!("Email notifications enabled");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::info!("Email notifications disabled (no SMTP configuration)");
            None
        }
    };

    let state = AppState::new(Arc::new(PgTicketStore::new(pool)), mailer);
    let app = create_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server failed");
}
