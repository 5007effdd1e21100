use axum::{extract::FromRequest, Json};

use crate::{Error, Result};

pub mod posts;

/// `Json` whose rejections (bad syntax, wrong types, missing content type)
/// come back as `Error::BadRequest`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Path ids arrive as raw strings; anything that is not an `i32` is a 400
/// before storage is touched.
pub(crate) fn parse_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| Error::BadRequest(format!("'{raw}' is not a valid id")))
}
