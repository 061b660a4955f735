use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::response::{PersonaCardDto, PersonaDetailDto, PersonaGridDto, SuggestionsDto},
    services::persona_service::GRID_COLUMNS,
};

#[get("/api/personas")]
pub async fn list_personas(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rows = state
        .persona_service
        .grid(GRID_COLUMNS)
        .into_iter()
        .map(|row| row.into_iter().map(PersonaCardDto::from).collect())
        .collect();

    Ok(HttpResponse::Ok().json(PersonaGridDto {
        title: "Honda Japan Market Research — User Personas for India".to_string(),
        instructions: "Select a persona to interview. The assistant will roleplay the selected user."
            .to_string(),
        rows,
    }))
}

#[get("/api/personas/{id}")]
pub async fn get_persona(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let persona = state.persona_service.get(&id)?;
    Ok(HttpResponse::Ok().json(PersonaDetailDto::from(persona)))
}

#[get("/api/personas/{id}/starters")]
pub async fn get_persona_starters(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let persona = state.persona_service.get(&id)?;
    Ok(HttpResponse::Ok().json(SuggestionsDto {
        heading: Some("Interview starters".to_string()),
        prompts: state.persona_service.starter_prompts(&persona.id),
    }))
}
