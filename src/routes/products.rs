use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::api::RestClient;
use crate::cache::QueryCache;
use crate::forms::inquiry::ProductInquiryForm;
use crate::models::config::ServerConfig;
use crate::routes::{api_for, base_context, redirect, render_template, service_error_response};
use crate::services::ServiceError;
use crate::services::inquiry::{SubmissionOutcome, submit_product_inquiry};
use crate::services::products::{ListingParams, show_product_detail, show_products as show_products_service};

#[derive(Deserialize)]
struct ProductsQueryParams {
    /// May carry the literal `"undefined"`/`"null"` from browser URL
    /// round-tripping; the query builder filters those out.
    category: Option<String>,
    search: Option<String>,
}

#[get("/products")]
pub async fn show_products(
    req: HttpRequest,
    params: web::Query<ProductsQueryParams>,
    flash_messages: IncomingFlashMessages,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let api = api_for(&req, client.get_ref());
    let page = show_products_service(
        ListingParams {
            category: params.category,
            search: params.search,
        },
        &api,
        cache.get_ref(),
    )
    .await;

    let mut context = base_context(&flash_messages, "products", config.get_ref());
    context.insert("page", &page);
    render_template(&tera, "products/index.html", &context)
}

#[get("/products/{id}")]
pub async fn show_product(
    req: HttpRequest,
    id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api_for(&req, client.get_ref());
    match show_product_detail(&id, &api, cache.get_ref()).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, "products", config.get_ref());
            context.insert("page", &page);
            render_template(&tera, "products/detail.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found").send();
            redirect("/products")
        }
        Err(e) => service_error_response(e, &req, "/products"),
    }
}

#[post("/products/{id}/inquiry")]
pub async fn submit_inquiry(
    req: HttpRequest,
    id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    form: web::Form<ProductInquiryForm>,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api_for(&req, client.get_ref());
    let detail = match show_product_detail(&id, &api, cache.get_ref()).await {
        Ok(page) => page,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found").send();
            return redirect("/products");
        }
        Err(e) => return service_error_response(e, &req, "/products"),
    };

    let form = form.into_inner();
    let outcome =
        submit_product_inquiry(form.clone(), &detail.product.name, &api, cache.get_ref()).await;

    let mut context = base_context(&flash_messages, "products", config.get_ref());
    context.insert("page", &detail);
    context.insert("inquiry_outcome", &outcome);
    context.insert("inquiry_open", &true);
    // Keep the visitor's input on failure so a retry needs no retyping.
    if !matches!(outcome, SubmissionOutcome::Succeeded { .. }) {
        context.insert("inquiry_form", &form);
    }
    render_template(&tera, "products/detail.html", &context)
}
