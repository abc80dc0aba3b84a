use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{
    web::{self, Either},
    HttpResponse, Responder,
};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::enrollment::models::{MatriculaRequest, Submission};
use crate::enrollment::validation::validate_submission;
use crate::AppState;

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Landing page with the enrollment form.
pub async fn index(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    let path = state.config.public_dir.join("index.html");
    debug!("Serving landing page from {}", path.display());
    Ok(NamedFile::open_async(path).await?)
}

#[utoipa::path(
    post,
    path = "/enviar-matricula",
    tag = "Enrollment",
    request_body(
        content = MatriculaRequest,
        description = "Enrollment form as JSON or application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Enrollment PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Invalid or incomplete submission", content_type = "text/plain", body = String),
        (status = 500, description = "PDF could not be generated", content_type = "text/plain", body = String)
    )
)]
pub async fn enviar_matricula(
    state: web::Data<AppState>,
    payload: Either<web::Json<MatriculaRequest>, web::Form<Vec<(String, String)>>>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let request = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => MatriculaRequest::from_form_pairs(form.into_inner()),
    };
    let submission = Submission::from(request);

    info!(
        "[{}] Enrollment received: cicle={} curs={} moduls={}",
        request_id,
        submission.cicle,
        submission.curs,
        submission.moduls.len()
    );

    if let Err(errors) = validate_submission(&submission, state.validation_policy()) {
        warn!(
            "[{}] Enrollment rejected, invalid fields: {:?}",
            request_id,
            errors.fields()
        );
        return HttpResponse::BadRequest()
            .content_type(PLAIN_TEXT)
            .body(errors.to_message());
    }

    match state.generator.generate(&submission).await {
        Ok(document) => {
            info!(
                "[{}] Enrollment PDF generated ({} bytes)",
                request_id,
                document.pdf.len()
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(document.filename)],
                })
                .body(document.pdf)
        }
        Err(e) => {
            error!("[{}] Failed to generate enrollment PDF: {}", request_id, e);
            HttpResponse::InternalServerError()
                .content_type(PLAIN_TEXT)
                .body(format!("Error generant el PDF: {}", e))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/enviar-matricula").route(web::post().to(enviar_matricula)));
}
