use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::form::draft::{FormAction, ResumeForm};
use crate::form::fields::bind;
use crate::form::validation::{validate, ValidationReport};
use crate::models::resume::ResumeRecord;
use crate::render::RecordSource;
use crate::resume::{load_for_display, save_record};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FormPageQuery {
    /// Prefill the form from the saved record instead of blank defaults.
    #[serde(default)]
    pub edit: bool,
}

/// GET /
pub async fn handle_form_page(
    State(state): State<AppState>,
    Query(params): Query<FormPageQuery>,
) -> Result<Html<String>, AppError> {
    let form = if params.edit {
        match load_for_display(state.store.as_ref(), state.storage_key()).await? {
            (record, RecordSource::Stored) => ResumeForm::from_record(record),
            (_, RecordSource::Sample) => ResumeForm::new(),
        }
    } else {
        ResumeForm::new()
    };
    Ok(Html(state.templates.render_form(&form, None)?))
}

/// POST /
///
/// The body carries every field by dotted path plus the `action` of the
/// button that was pressed. List actions re-render the edited form; `submit`
/// validates, saves and redirects to the rendered resume.
pub async fn handle_form_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let action = match pairs.iter().find(|(k, _)| k == "action") {
        Some((_, value)) => value.parse::<FormAction>()?,
        None => FormAction::Submit,
    };
    let mut form = bind(&pairs);
    debug!(%action, "Form action");

    if action != FormAction::Submit {
        action.apply(&mut form)?;
        return Ok(Html(state.templates.render_form(&form, None)?).into_response());
    }

    match save_record(state.store.as_ref(), state.storage_key(), form.record()).await {
        Ok(()) => Ok(Redirect::to("/resume").into_response()),
        Err(AppError::Validation(errors)) => {
            let html = state.templates.render_form(&form, Some(&errors))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /api/v1/form/defaults
pub async fn handle_form_defaults() -> Json<ResumeRecord> {
    Json(ResumeForm::new().into_record())
}

/// POST /api/v1/form/validate
pub async fn handle_form_validate(Json(record): Json<ResumeRecord>) -> Json<ValidationReport> {
    Json(ValidationReport::from(validate(&record)))
}
