//! User and credential models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered user, as sent to `/auth/register` and kept in the offline mirror
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(rename = "nome")]
    pub full_name: String,
    pub email: String,
    /// Brazilian CPF
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl User {
    /// Whether these credentials identify this user
    #[must_use]
    pub fn matches(&self, credentials: &Credentials) -> bool {
        self.username == credentials.username && self.password == credentials.password
    }
}

impl fmt::Debug for User {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("User")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("national_id", &self.national_id)
            .field("postal_code", &self.postal_code)
            .field("address", &self.address)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login payload
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            username: "maria".to_string(),
            full_name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            national_id: "52998224725".to_string(),
            postal_code: "01001000".to_string(),
            address: "Praça da Sé, Sé, São Paulo - SP".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn user_uses_wire_field_names() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["nome"], "Maria Silva");
        assert_eq!(json["cpf"], "52998224725");
        assert_eq!(json["cep"], "01001000");
        assert_eq!(json["endereco"], "Praça da Sé, Sé, São Paulo - SP");
        assert_eq!(json["senha"], "hunter2");
    }

    #[test]
    fn debug_redacts_passwords() {
        let rendered = format!("{:?}", user());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));

        let rendered = format!("{:?}", Credentials::new("maria", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn matches_requires_username_and_password() {
        let user = user();
        assert!(user.matches(&Credentials::new("maria", "hunter2")));
        assert!(!user.matches(&Credentials::new("maria", "wrong")));
        assert!(!user.matches(&Credentials::new("joao", "hunter2")));
    }

    #[test]
    fn credentials_serialize_password_as_senha() {
        let json = serde_json::to_value(Credentials::new("maria", "pw")).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "maria", "senha": "pw" }));
    }
}
