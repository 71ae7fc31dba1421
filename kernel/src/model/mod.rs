pub mod auth;
pub mod id;
pub mod reservation;
pub mod role;
pub mod room;
pub mod stats;
pub mod user;
