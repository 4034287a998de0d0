use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Editor,
    #[default]
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 3] =
        [Self::SuperAdmin, Self::Editor, Self::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Editor => "editor",
            Self::User => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Editor => "Editor",
            Self::User => "Cliente",
        }
    }

    /// Roles allowed into the back office.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Editor)
    }

    pub fn can_manage_roles(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for UserRole {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" => Ok(Self::SuperAdmin),
            "editor" => Ok(Self::Editor),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid user role: {}", s)),
        }
    }
}
