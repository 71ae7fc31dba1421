pub mod event;

/// Opaque bearer token handed out at login and stored in the key-value
/// store until logout or expiry.
pub struct AccessToken(pub String);
