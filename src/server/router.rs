//! Route table for the REST surface

use crate::server::AppState;
use crate::server::handlers::{admin, advertisements, properties, reservations};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router
///
/// - `/properties` — list (available only), create, retrieve (with the
///   unavailable-message fallback), update, delete-with-cascade
/// - `/advertisements` — list (ordered by platform), create,
///   retrieve-or-update
/// - `/reservations` — list, create, retrieve-or-delete
/// - `/admin/*` — unrestricted listings
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route(
            "/properties/{id}",
            get(properties::get_property)
                .put(properties::update_property)
                .patch(properties::update_property)
                .delete(properties::delete_property),
        )
        .route(
            "/advertisements",
            get(advertisements::list_advertisements).post(advertisements::create_advertisement),
        )
        .route(
            "/advertisements/{id}",
            get(advertisements::get_advertisement)
                .put(advertisements::update_advertisement)
                .patch(advertisements::update_advertisement),
        )
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation).delete(reservations::delete_reservation),
        )
        .route("/admin/properties", get(admin::list_all_properties))
        .route("/admin/advertisements", get(admin::list_all_advertisements))
        .route("/admin/reservations", get(admin::list_all_reservations))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
