use actix_web::{web, HttpResponse};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Timestamp;
use serde_json::json;

use super::{with_connection, Pool};
use crate::{
    db::NOW,
    errors::ServerError,
    models::note::NoteInput,
    schema::notes::dsl::{category, description, notes, title, updated_at},
};

pub async fn update(
    note_id: web::Path<i32>,
    input: web::Json<NoteInput>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let note_id = note_id.into_inner();
    let fields = input.into_inner().into_fields()?;

    let row = fields.clone();
    let affected = with_connection(pool, "Error updating note", move |connection| {
        diesel::update(notes.find(note_id))
            .set((
                title.eq(&row.title),
                description.eq(&row.description),
                category.eq(row.category.as_str()),
                updated_at.eq(sql::<Timestamp>(NOW)),
            ))
            .execute(connection)
    })
    .await?;

    if affected == 0 {
        return Err(ServerError::NotFound);
    }

    Ok(HttpResponse::Ok().json(json!(fields.into_info(note_id))))
}

pub async fn delete(
    note_id: web::Path<i32>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let note_id = note_id.into_inner();

    let affected = with_connection(pool, "Error deleting note", move |connection| {
        diesel::delete(notes.find(note_id)).execute(connection)
    })
    .await?;

    if affected == 0 {
        return Err(ServerError::NotFound);
    }

    Ok(HttpResponse::Ok().body("Note deleted successfully"))
}
