pub mod health_handler;
pub mod persona_handler;
pub mod session_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use persona_handler::{get_persona, get_persona_starters, list_personas};
pub use session_handler::{
    back_to_personas, clear_conversation, create_session, delete_session, get_session,
    get_sources, get_suggestions, select_persona, send_message, stream_message,
};

/// Registers every route on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(health_check_live)
        .service(list_personas)
        .service(get_persona_starters)
        .service(get_persona)
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(select_persona)
        .service(back_to_personas)
        .service(clear_conversation)
        .service(get_suggestions)
        .service(get_sources)
        .service(send_message)
        .service(stream_message);
}
