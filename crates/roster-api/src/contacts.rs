//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path               | Notes |
//! |----------|--------------------|-------|
//! | `GET`    | `/contacts/active` | Active contacts; any permission but `None` |
//! | `GET`    | `/contacts/:id`    | 404 if not found |
//! | `POST`   | `/contacts`        | Body: [`ContactView`]; returns rows written |
//! | `PUT`    | `/contacts/:id`    | Body: [`ContactView`]; returns rows written |
//! | `DELETE` | `/contacts/:id`    | Returns rows written |
//!
//! Path and body extraction failures are held back until the caller has been
//! authorized, so a caller without access always gets a bare 401.

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use roster_core::{contact::ContactView, store::ContactStore};

use crate::{AppState, error::ApiError, session::Caller};

type IdParam = Result<Path<i64>, PathRejection>;
type ContactBody = Result<Json<ContactView>, JsonRejection>;

fn id_of(param: IdParam) -> Result<i64, ApiError> {
  param
    .map(|Path(id)| id)
    .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn view_of(body: ContactBody) -> Result<ContactView, ApiError> {
  body
    .map(|Json(view)| view)
    .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// `GET /contacts/active`
pub async fn list_active<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
) -> Result<Json<Vec<ContactView>>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let views = state.service.list_active(caller.as_deref()).await?;
  Ok(Json(views))
}

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  id: IdParam,
) -> Result<Json<ContactView>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  state.service.authorize_read(caller.as_deref()).await?;
  let view = state.service.get_by_id(caller.as_deref(), id_of(id)?).await?;
  Ok(Json(view))
}

/// `POST /contacts` — returns the number of rows written, not the new id.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  body: ContactBody,
) -> Result<Json<usize>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  state.service.authorize_write(caller.as_deref()).await?;
  let rows = state.service.create(caller.as_deref(), view_of(body)?).await?;
  Ok(Json(rows))
}

/// `PUT /contacts/:id`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  id: IdParam,
  body: ContactBody,
) -> Result<Json<usize>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  state.service.authorize_write(caller.as_deref()).await?;
  let (id, view) = (id_of(id)?, view_of(body)?);
  let rows = state.service.update(caller.as_deref(), id, view).await?;
  Ok(Json(rows))
}

/// `DELETE /contacts/:id`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  caller: Caller,
  id: IdParam,
) -> Result<Json<usize>, ApiError>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  state.service.authorize_write(caller.as_deref()).await?;
  let rows = state.service.delete(caller.as_deref(), id_of(id)?).await?;
  Ok(Json(rows))
}
