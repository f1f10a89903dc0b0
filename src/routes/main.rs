use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::RestClient;
use crate::cache::QueryCache;
use crate::models::config::ServerConfig;
use crate::routes::{api_for, base_context, render_template};
use crate::services::main::{list_brochures, show_home};

#[get("/")]
pub async fn index(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api_for(&req, client.get_ref());
    let page = show_home(&api, cache.get_ref()).await;

    let mut context = base_context(&flash_messages, "home", config.get_ref());
    context.insert("page", &page);
    render_template(&tera, "main/index.html", &context)
}

#[get("/about")]
pub async fn about(
    flash_messages: IncomingFlashMessages,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "about", config.get_ref());
    render_template(&tera, "main/about.html", &context)
}

#[get("/brochures")]
pub async fn brochures(
    flash_messages: IncomingFlashMessages,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "brochures", config.get_ref());
    context.insert("brochures", &list_brochures());
    render_template(&tera, "main/brochures.html", &context)
}
