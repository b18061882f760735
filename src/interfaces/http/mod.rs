use crate::application::ResolveAnswerUseCase;
use crate::domain::error::AppError;
use crate::domain::upload::UploadedFile;
use crate::infrastructure::config::AppConfig;
use actix_cors::Cors;
use actix_multipart::form::bytes::Bytes as UploadBytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{guard, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct HttpState {
    pub resolve_use_case: ResolveAnswerUseCase,
}

#[derive(MultipartForm)]
pub struct AskMultipart {
    pub question: Option<Text<String>>,
    pub file: Option<UploadBytes>,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: Option<String>,
}

async fn solve_multipart(
    data: web::Data<HttpState>,
    form: MultipartForm<AskMultipart>,
) -> impl Responder {
    let form = form.into_inner();

    let question = form.question.map(|text| text.0).unwrap_or_default();
    let file = form.file.map(|upload| {
        UploadedFile::new(
            upload.file_name.unwrap_or_default(),
            upload.data.to_vec(),
        )
    });

    respond(&data, &question, file).await
}

async fn solve_form(data: web::Data<HttpState>, form: web::Form<AskForm>) -> impl Responder {
    let question = form.into_inner().question.unwrap_or_default();
    respond(&data, &question, None).await
}

async fn respond(
    data: &web::Data<HttpState>,
    question: &str,
    file: Option<UploadedFile>,
) -> HttpResponse {
    info!(
        question = %question,
        has_file = file.is_some(),
        "Received question"
    );

    match data.resolve_use_case.execute(question, file).await {
        Ok(answer) => HttpResponse::Ok().json(AnswerResponse { answer }),
        Err(AppError::ValidationError(msg)) => {
            HttpResponse::BadRequest().json(ErrorResponse { error: msg })
        }
        Err(err) => {
            error!(error = %err, "Failed to resolve question");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: err.to_string(),
            })
        }
    }
}

fn is_multipart(ctx: &guard::GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service(
            web::resource("/")
                .route(web::post().guard(guard::fn_guard(is_multipart)).to(solve_multipart))
                .route(web::post().to(solve_form)),
        ),
    );
}

pub fn start_server(config: &AppConfig, resolve_use_case: ResolveAnswerUseCase) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { resolve_use_case });

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["POST", "OPTIONS"])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
