use std::{net::SocketAddr, sync::Arc};

use dotenvy::dotenv;
use mockall_double::double;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use constants::*;

#[double]
use database::AppDatabase;

#[double]
use mailer::EmailClient;

pub mod app;
pub mod constants;
pub mod database;
pub mod handlers;
pub mod jwt;
pub mod mailer;
pub mod models;
pub mod swagger;
pub mod utils;

pub async fn start_web_server() {
    // import .env file
    dotenv().ok();
    initialize_logging();
    // create database client
    let db_client = AppDatabase::new()
        .await
        .expect("Unable to accquire database client");
    let db_client = Arc::new(db_client);
    // email uniqueness must hold even when two signup requests race
    db_client
        .create_unique_index(DB_NAME, COLL_USERS, "email")
        .await
        .expect("Unable to create unique index on users email");
    // create the smtp client
    let email_client = EmailClient::new().expect("Unable to create smtp client");
    let email_client = Arc::new(email_client);
    start_server(db_client, email_client).await;
}

fn initialize_logging() {
    // create default env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or("authflow_backend_rust=debug".into());

    // initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

async fn start_server(db_client: Arc<AppDatabase>, email_client: Arc<EmailClient>) {
    // read the port number from env variable
    let port = std::env::var("PORT").unwrap_or_default();
    let port = port.parse::<u16>().unwrap_or(3000);
    // build the socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    // create the app instance
    let app = app::build_app(db_client, email_client);
    tracing::debug!("Starting the app in: {addr}");
    // start serving the app in the socket address
    axum::Server::bind(&addr).serve(app).await.unwrap();
}
