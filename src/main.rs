// src/main.rs
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use symptom_gateway::api::{configure_routes, AppState};
use symptom_gateway::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Falling back to process environment");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = match std::env::var("GATEWAY_CONFIG") {
        Ok(path) => {
            println!("📄 Loading configuration from {}", path);
            config::AppConfig::from_file(&path)
        }
        Err(_) => config::AppConfig::from_env(),
    }
    .expect("Failed to load gateway configuration");

    println!("🔗 Prediction service: {}", app_config.prediction.api_base);
    println!("⏳ Idle sessions expire after {}s", app_config.server.session_ttl_secs);

    let bind = (app_config.server.host.clone(), app_config.server.port);
    let state = AppState::new(app_config);

    println!("🚀 Starting server on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
