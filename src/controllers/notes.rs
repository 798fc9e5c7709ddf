//! Notes REST API — CRUD over the `notes` table.

use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::AppState;
use crate::db::DbError;
use crate::models::{NoteData, NoteList};

/// Parse the `{note_id}` path segment, rejecting non-integer ids.
fn parse_note_id(raw: &str) -> Result<i64, HttpResponse> {
    raw.parse::<i64>().map_err(|_| {
        HttpResponse::BadRequest().json(json!({
            "error": "invalid note id"
        }))
    })
}

/// Sole translator from a typed store error to an HTTP response.
fn render_db_error(context: &str, err: DbError) -> HttpResponse {
    match err {
        DbError::NotFound => HttpResponse::NotFound().json(json!({
            "error": "note not found"
        })),
        DbError::Sqlite(e) => {
            log::error!("[NOTES] {}: {}", context, e);
            HttpResponse::InternalServerError().json(json!({
                "error": "internal server error"
            }))
        }
    }
}

async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    match data.db.list_notes() {
        Ok(notes) => HttpResponse::Ok().json(NoteList { notes }),
        Err(e) => render_db_error("list failed", e),
    }
}

async fn create_note(data: web::Data<AppState>, body: web::Json<NoteData>) -> impl Responder {
    if let Err(msg) = body.validate() {
        return HttpResponse::BadRequest().json(json!({ "error": msg }));
    }

    match data.db.create_note(&body) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(e) => render_db_error("create failed", e),
    }
}

async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let note_id = match parse_note_id(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match data.db.get_note(note_id) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => render_db_error("get failed", e),
    }
}

async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NoteData>,
) -> impl Responder {
    let note_id = match parse_note_id(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(msg) = body.validate() {
        return HttpResponse::BadRequest().json(json!({ "error": msg }));
    }

    match data.db.update_note(note_id, &body) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => render_db_error("update failed", e),
    }
}

async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let note_id = match parse_note_id(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match data.db.delete_note(note_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => render_db_error("delete failed", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{note_id}", web::get().to(get_note))
            .route("/{note_id}", web::put().to(update_note))
            .route("/{note_id}", web::delete().to(delete_note)),
    );
}
