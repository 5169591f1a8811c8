use serde::{Deserialize, Serialize};

use crate::error::{PetcareError, PetcareResult};
use crate::models::de_id;

/// A registered user. The password never comes back from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "username")]
    pub name: String,
    pub email: String,
}

/// Reply of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> PetcareResult<()> {
        if self.name.trim().is_empty() {
            return Err(PetcareError::Validation("Name is required".into()));
        }
        validate_credentials(&self.email, &self.password)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> PetcareResult<()> {
        validate_credentials(&self.email, &self.password)
    }
}

fn validate_credentials(email: &str, password: &str) -> PetcareResult<()> {
    if !email.contains('@') {
        return Err(PetcareError::Validation(format!(
            "'{}' is not an email address",
            email
        )));
    }
    if password.is_empty() {
        return Err(PetcareError::Validation("Password is required".into()));
    }
    Ok(())
}
