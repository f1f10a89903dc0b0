use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::api::RestClient;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

pub mod inquiry;
pub mod main;
pub mod products;

/// Maps a flash level to the alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Renders a template, degrading to an empty body on template errors so a
/// broken template never takes the page down with a 500.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

/// Context shared by every page: flash alerts, active nav entry, site URL.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    config: &ServerConfig,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("app_url", &config.app_url);
    context
}

/// 303 redirect to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, location))
        .finish()
}

fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Redirects to the login page carrying the original location, clearing the
/// stored credentials. Used whenever the API answers 401 with code
/// `unauthorized`.
pub fn login_redirect(req: &HttpRequest) -> HttpResponse {
    let original = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = format!("/login?redirect_url={}", urlencode(original));

    let mut token = Cookie::new("token", "");
    token.set_path("/");
    token.make_removal();
    let mut user = Cookie::new("user", "");
    user.set_path("/");
    user.make_removal();

    HttpResponse::SeeOther()
        .append_header((header::LOCATION, location))
        .cookie(token)
        .cookie(user)
        .finish()
}

/// Clones the shared client, attaching the visitor's bearer token when the
/// `token` cookie is present.
pub fn api_for(req: &HttpRequest, client: &RestClient) -> RestClient {
    match req.cookie("token") {
        Some(cookie) => client.with_bearer(cookie.value()),
        None => client.clone(),
    }
}

/// Uniform handling for service failures that should leave the current
/// page: login redirect for expired tokens, flash toasts for the rest.
pub fn service_error_response(
    error: ServiceError,
    req: &HttpRequest,
    fallback_location: &str,
) -> HttpResponse {
    match error {
        ServiceError::Unauthorized => login_redirect(req),
        ServiceError::Forbidden => {
            FlashMessage::error("You are not allowed to access this resource").send();
            redirect(fallback_location)
        }
        ServiceError::NotFound => {
            FlashMessage::error("Not found").send();
            redirect(fallback_location)
        }
        ServiceError::Api(message) => {
            FlashMessage::error(message).send();
            redirect(fallback_location)
        }
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}
