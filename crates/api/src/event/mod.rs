mod check_conflicts;
mod create_event;
mod delete_event;
mod get_event;
mod get_events;
mod search_events;
mod subscribers;
mod update_event;

use actix_web::web;
use check_conflicts::check_conflicts_controller;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
pub use delete_event::DeleteEventUseCase;
use get_event::get_event_controller;
pub use get_event::GetEventUseCase;
use get_events::get_events_controller;
use search_events::search_events_controller;
use update_event::update_event_controller;
pub use update_event::UpdateEventUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events", web::get().to(get_events_controller));

    cfg.route(
        "/events/check-conflicts",
        web::post().to(check_conflicts_controller),
    );
    cfg.route(
        "/events/content/search",
        web::get().to(search_events_controller),
    );

    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );
}
