use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, show_my_reservations, show_reservation, update_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", get(show_my_reservations))
        .route("/:reservation_id", get(show_reservation))
        .route("/:reservation_id", put(update_reservation))
        .route("/:reservation_id/cancel", put(cancel_reservation));

    Router::new().nest("/reservations", reservation_routers)
}
