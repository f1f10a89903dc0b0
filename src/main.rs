use std::time::Duration;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use agrovista_web::api::RestClient;
use agrovista_web::cache::QueryCache;
use agrovista_web::models::config::ServerConfig;
use agrovista_web::routes::inquiry::{admin_inquiries, contact, delete_inquiry, submit_contact};
use agrovista_web::routes::main::{about, brochures, index};
use agrovista_web::routes::products::{show_product, show_products, submit_inquiry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::other(format!("configuration error: {e}")))?;

    let tera = Tera::new("templates/**/*.html")
        .map_err(|e| std::io::Error::other(format!("template error: {e}")))?;

    let secret_key = match &config.secret_key {
        Some(secret) => Key::from(secret.as_bytes()),
        None => Key::generate(),
    };
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let api = web::Data::new(RestClient::new(&config.server_endpoint));
    let cache = web::Data::new(QueryCache::new(Duration::from_secs(config.cache_stale_secs)));
    let tera = web::Data::new(tera);
    let bind_address = config.bind_address.clone();
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .app_data(config.clone())
            .app_data(tera.clone())
            .app_data(api.clone())
            .app_data(cache.clone())
            .service(Files::new("/assets", "./assets"))
            .service(index)
            .service(about)
            .service(brochures)
            .service(show_products)
            .service(show_product)
            .service(submit_inquiry)
            .service(contact)
            .service(submit_contact)
            .service(admin_inquiries)
            .service(delete_inquiry)
    })
    .bind(&bind_address)?
    .run()
    .await
}
