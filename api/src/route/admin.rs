use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::admin::{
    approve_reservation, dashboard, reject_reservation, show_all_reservations, statistics,
};

pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/reservations", get(show_all_reservations))
        .route("/reservations/:reservation_id/approve", put(approve_reservation))
        .route("/reservations/:reservation_id/reject", put(reject_reservation))
        .route("/statistics", get(statistics));

    Router::new().nest("/admin", admin_routers)
}
