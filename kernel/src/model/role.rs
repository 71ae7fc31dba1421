use strum::EnumString;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, sqlx::Type,
)]
#[sqlx(type_name = "role", rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}
