//! User identities.
//!
//! A `User` is the session subject only: the data service does not manage a
//! user collection and no credential material is stored anywhere in the core.

use crate::DomainError;
use chrono::{DateTime, Utc};
use hms_uuid::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a system user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
}

impl UserRole {
    /// The fixed wire token for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Doctor => "doctor",
            UserRole::Nurse => "nurse",
            UserRole::Receptionist => "receptionist",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "doctor" => Ok(UserRole::Doctor),
            "nurse" => Ok(UserRole::Nurse),
            "receptionist" => Ok(UserRole::Receptionist),
            _ => Err(DomainError::UnknownToken {
                kind: "user role",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A system user, as tracked by the session store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The user's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_with_contract_field_names() {
        let user = User {
            id: RecordId::new(),
            username: "admin".into(),
            email: "admin@hospital.com".into(),
            first_name: "Admin".into(),
            last_name: "User".into(),
            role: UserRole::Admin,
            is_active: true,
            created_at: "2024-01-01T00:00:00Z".parse().expect("valid timestamp"),
        };

        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["firstName"], "Admin");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn role_tokens_parse_back() {
        for role in [
            UserRole::Admin,
            UserRole::Doctor,
            UserRole::Nurse,
            UserRole::Receptionist,
        ] {
            let parsed: UserRole = role.as_str().parse().expect("round trip");
            assert_eq!(parsed, role);
        }
        assert!("janitor".parse::<UserRole>().is_err());
    }
}
