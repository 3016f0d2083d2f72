pub mod auth_handlers;
pub mod profile_handlers;
pub mod proposal_handlers;
pub mod submit_handlers;

use actix_web::{HttpResponse, web};

use crate::navigation::Navigation;

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

/// Turn a recorded navigation into a response. A POST answered with 303
/// replaces the form's entry in history; a plain navigation uses 302.
pub fn redirect(nav: &Navigation) -> HttpResponse {
    if nav.options.replace {
        see_other(&nav.path)
    } else {
        HttpResponse::Found()
            .insert_header(("Location", nav.path.clone()))
            .finish()
    }
}

/// Register every page route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async { see_other("/proposals") }))
        .route("/proposals", web::get().to(proposal_handlers::list))
        .route("/proposal", web::get().to(proposal_handlers::detail))
        .route("/profile", web::get().to(profile_handlers::show))
        .route("/connect", web::get().to(auth_handlers::connect_page))
        .route("/connect", web::post().to(auth_handlers::connect_submit))
        .route("/disconnect", web::post().to(auth_handlers::disconnect))
        .route("/submit/ban-name", web::get().to(submit_handlers::ban_name_form))
        .route("/submit/ban-name", web::post().to(submit_handlers::ban_name_submit))
        .route(
            "/api/submit/ban-name/check",
            web::post().to(submit_handlers::ban_name_check),
        );
}

/// Default 404 handler (must be registered last).
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/errors/404.html"))
}
