use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::RestClient;
use crate::cache::QueryCache;
use crate::forms::inquiry::InquiryForm;
use crate::models::config::ServerConfig;
use crate::routes::{api_for, base_context, redirect, render_template, service_error_response};
use crate::services::inquiry::{
    InquiryRow, SubmissionOutcome, delete_inquiry as delete_inquiry_service, list_inquiries,
    submit_contact_inquiry,
};

#[get("/contact")]
pub async fn contact(
    flash_messages: IncomingFlashMessages,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, "contact", config.get_ref());
    render_template(&tera, "inquiry/contact.html", &context)
}

#[post("/contact")]
pub async fn submit_contact(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    form: web::Form<InquiryForm>,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api_for(&req, client.get_ref());
    let form = form.into_inner();
    let outcome = submit_contact_inquiry(form.clone(), &api, cache.get_ref()).await;

    let mut context = base_context(&flash_messages, "contact", config.get_ref());
    context.insert("outcome", &outcome);
    // Keep the visitor's input on failure so a retry needs no retyping.
    if !matches!(outcome, SubmissionOutcome::Succeeded { .. }) {
        context.insert("form", &form);
    }
    render_template(&tera, "inquiry/contact.html", &context)
}

#[get("/admin/inquiries")]
pub async fn admin_inquiries(
    req: HttpRequest,
    flash_messages: IncomingFlashMessages,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api_for(&req, client.get_ref());
    match list_inquiries(&api, cache.get_ref()).await {
        Ok(inquiries) => {
            let rows: Vec<InquiryRow> = inquiries.iter().map(InquiryRow::from).collect();
            let mut context = base_context(&flash_messages, "admin", config.get_ref());
            context.insert("inquiries", &rows);
            render_template(&tera, "inquiry/admin.html", &context)
        }
        Err(e) => service_error_response(e, &req, "/"),
    }
}

#[post("/admin/inquiries/{id}/delete")]
pub async fn delete_inquiry(
    req: HttpRequest,
    id: web::Path<String>,
    client: web::Data<RestClient>,
    cache: web::Data<QueryCache>,
) -> impl Responder {
    let api = api_for(&req, client.get_ref());
    match delete_inquiry_service(&id, &api, cache.get_ref()).await {
        Ok(()) => {
            FlashMessage::success("Inquiry deleted").send();
            redirect("/admin/inquiries")
        }
        Err(e) => service_error_response(e, &req, "/admin/inquiries"),
    }
}
