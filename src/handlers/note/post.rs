use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde_json::json;

use super::{with_connection, Pool};
use crate::{
    errors::ServerError,
    models::note::{InsertNote, NoteInput},
    schema::notes::dsl::{id, notes},
};

pub async fn create(
    input: web::Json<NoteInput>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let fields = input.into_inner().into_fields()?;

    let row = fields.clone();
    let note_id = with_connection(pool, "Error adding note", move |connection| {
        diesel::insert_into(notes)
            .values(InsertNote::from(&row))
            .returning(id)
            .get_result::<i32>(connection)
    })
    .await?;

    log::debug!("note {note_id} created");
    Ok(HttpResponse::Created().json(json!(fields.into_info(note_id))))
}
