use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{
    appointment, artist, auth, booking, catalog, favorite, health, payment, review,
    saved_ar, tattoo, user,
};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Registration & login
        .route("/register/user", post(auth::register_user))
        .route("/register/artist", post(auth::register_artist))
        .route("/register/artist/confirm", post(auth::confirm_artist))
        .route("/login", post(auth::login))

        // Artist membership checkout
        .route("/stripe/create-checkout-session", post(payment::create_checkout_session))

        // Profile
        .route("/users/me", get(user::me).patch(user::update_me).delete(user::delete_me))

        // Artist directory
        .route("/artists", get(artist::list_artists))
        .route("/artists/{id}", get(artist::get_artist).patch(artist::update_artist))

        // Tattoo gallery
        .route("/tattoos", post(tattoo::create_tattoo))
        .route("/tattoos/{id}", patch(tattoo::update_tattoo))

        // Catalogs
        .route("/cities", get(catalog::list_cities))
        .route("/styles", get(catalog::list_styles))
        .route("/sizes", get(catalog::list_sizes))
        .route("/placements", get(catalog::list_placements))
        .route("/booking-statuses", get(catalog::list_booking_statuses))

        // Appointment slots
        .route("/appointments", post(appointment::create_slot))
        .route("/appointments/available", get(appointment::available_slots))
        .route("/appointments/artist", get(appointment::artist_slots))
        .route("/appointments/{id}", delete(appointment::delete_slot))

        // Booking lifecycle
        .route("/bookings", post(booking::create_booking))
        .route("/bookings/artist", get(booking::artist_bookings))
        .route("/bookings/{id}", get(booking::get_booking))
        .route("/bookings/{id}/price", patch(booking::set_price))
        .route("/bookings/{id}/status", patch(booking::respond_to_quote))
        .route("/bookings/{id}/cancel", patch(booking::cancel_booking))

        // Reviews, favorites, saved AR previews
        .route("/reviews", post(review::create_review))
        .route("/reviews/{id}", delete(review::delete_review))
        .route("/favorites", post(favorite::create_favorite))
        .route("/favorites/{id}", delete(favorite::delete_favorite))
        .route("/savedars", post(saved_ar::create_saved_ar))
        .route("/savedars/{id}", delete(saved_ar::delete_saved_ar))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
