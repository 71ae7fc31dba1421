#[derive(Debug)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
}
