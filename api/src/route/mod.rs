pub mod admin;
pub mod auth;
pub mod health;
pub mod reservation;
pub mod room;
pub mod user;
pub mod v1;
