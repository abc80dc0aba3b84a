use actix_web::{web, HttpResponse, Responder};

use crate::catalog::CATALOG;

#[utoipa::path(
    get,
    path = "/api/cataleg",
    tag = "Catalog",
    responses(
        (status = 200, description = "Modules per program and year", body = std::collections::BTreeMap<String, std::collections::BTreeMap<String, Vec<String>>>)
    )
)]
pub async fn get_catalog() -> impl Responder {
    HttpResponse::Ok().json(&*CATALOG)
}

#[utoipa::path(
    get,
    path = "/api/cataleg/{cicle}/{curs}",
    tag = "Catalog",
    params(
        ("cicle" = String, Path, description = "Program code, e.g. DAM"),
        ("curs" = String, Path, description = "Program year, e.g. 1")
    ),
    responses(
        (status = 200, description = "Modules of the program year", body = Vec<String>),
        (status = 404, description = "Unknown program or year")
    )
)]
pub async fn get_modules(path: web::Path<(String, String)>) -> impl Responder {
    let (cicle, curs) = path.into_inner();
    match CATALOG.modules(&cicle, &curs) {
        Some(modules) => HttpResponse::Ok().json(modules),
        None => {
            log::debug!("Catalog lookup miss: {}/{}", cicle, curs);
            HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body(format!("No hi ha mòduls per al cicle '{}' curs '{}'", cicle, curs))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/cataleg").route(web::get().to(get_catalog)))
        .service(web::resource("/cataleg/{cicle}/{curs}").route(web::get().to(get_modules)));
}
