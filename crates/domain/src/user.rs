use derive_more::{Deref, Display};
use strum::{EnumString, IntoStaticStr};

/// The authenticated caller of a service operation.
///
/// The context is passed explicitly into every operation that needs an authorization decision
/// instead of being looked up from ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserID,
    pub role: Role,
}

impl AuthContext {
    #[must_use]
    pub fn new(user_id: impl Into<UserID>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// The coach on whose behalf programs are generated. Admins act as coaches.
    pub fn coach_id(&self) -> Result<CoachID, AuthorizationError> {
        match self.role {
            Role::Admin | Role::Coach => Ok(CoachID(self.user_id.0.clone())),
            Role::Client => Err(AuthorizationError::Forbidden(self.role)),
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserID(String);

impl From<&str> for UserID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deref, Display, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoachID(String);

impl From<&str> for CoachID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CoachID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Coach,
    Client,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AuthorizationError {
    #[error("role {0} is not allowed to perform this action")]
    Forbidden(Role),
}
