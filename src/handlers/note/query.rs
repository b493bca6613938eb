use actix_web::{web, HttpResponse};
use diesel::prelude::*;

use super::{with_connection, Pool};
use crate::{
    errors::ServerError,
    models::note::{ListQuery, Note, NoteFilter, LIKE_ESCAPE},
    schema::notes,
};

pub async fn list(
    query: web::Query<ListQuery>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, ServerError> {
    let filter = NoteFilter::from(query.into_inner());

    let found = with_connection(pool, "Error retrieving notes", move |connection| {
        let mut statement = notes::table.select(Note::as_select()).into_boxed();
        if let Some(category) = filter.category {
            statement = statement.filter(notes::category.eq(category));
        }
        if let Some(pattern) = filter.title_like {
            statement = statement.filter(notes::title.like(pattern).escape(LIKE_ESCAPE));
        }

        statement
            .order((notes::created_at.desc(), notes::id.desc()))
            .load::<Note>(connection)
    })
    .await?;

    Ok(HttpResponse::Ok().json(found))
}
