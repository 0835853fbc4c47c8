use serde::{Deserialize, Serialize};

/// Plain `{"message": ...}` body used for confirmations and errors alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub mod auth {
    use super::*;

    /// Body of `/signup` and `/login`.
    ///
    /// Both fields are optional on the wire so that a missing field is
    /// reported as a validation error instead of a JSON rejection.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignupResponse {
        pub id: i32,
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub access_token: String,
    }

    /// Identity recovered from a bearer token.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PrivateResponse {
        pub email: String,
        pub message: String,
    }
}

pub mod user {
    use super::*;

    /// Public representation of a user. There is deliberately no password
    /// field on this type.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub email: String,
        pub is_active: bool,
    }
}

pub mod catalog {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PersonView {
        pub id: i32,
        pub name: String,
        pub birth_year: f64,
        pub gender: String,
        pub height: String,
        pub skin_color: String,
        pub hair_color: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PlanetView {
        pub id: i32,
        pub name: String,
        pub climate: String,
        pub population: i64,
        pub orbital_period: i32,
        pub rotation_period: i32,
        pub diameter: i32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct VehicleView {
        pub id: i32,
        pub name: String,
        pub vehicle_class: String,
        pub length: f64,
        pub crew: i32,
        pub max_atmosphering_speed: i32,
        pub cargo_capacity: i32,
    }
}

pub mod favorite {
    use super::*;
    use crate::catalog::{PersonView, PlanetView, VehicleView};

    /// Query string of the `/favorite/...` endpoints.
    ///
    /// `user_id` stays a raw string: an absent or blank value is a validation
    /// error, and so is anything that is not an integer.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct FavoriteQuery {
        pub user_id: Option<String>,
    }

    /// Expanded favorites of a single user.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct FavoritesView {
        pub people: Vec<PersonView>,
        pub planets: Vec<PlanetView>,
        pub vehicles: Vec<VehicleView>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_view_has_no_password() {
        let user = user::UserView {
            id: 1,
            email: "a@x.com".to_string(),
            is_active: true,
        };
        let value = serde_json::to_value(&user).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert!(!object.contains_key("password"));
        assert_eq!(object["email"], "a@x.com");
        assert_eq!(object["is_active"], true);
    }

    #[test]
    fn credentials_accept_missing_fields() {
        let creds: auth::Credentials = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(creds.email.as_deref(), Some("a@x.com"));
        assert!(creds.password.is_none());

        let empty: auth::Credentials = serde_json::from_str("{}").unwrap();
        assert!(empty.email.is_none());
    }

    #[test]
    fn login_response_uses_access_token_key() {
        let body = auth::LoginResponse {
            access_token: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"access_token":"abc"}"#
        );
    }
}
