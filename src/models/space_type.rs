use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    #[default]
    Social,
    Corporate,
    Outdoor,
    Sports,
    Intimate,
}

impl SpaceType {
    pub const ALL: [SpaceType; 5] = [
        Self::Social,
        Self::Corporate,
        Self::Outdoor,
        Self::Sports,
        Self::Intimate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Corporate => "corporate",
            Self::Outdoor => "outdoor",
            Self::Sports => "sports",
            Self::Intimate => "intimate",
        }
    }

    /// Label shown to visitors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Social => "Social",
            Self::Corporate => "Corporativo",
            Self::Outdoor => "Ao Ar Livre",
            Self::Sports => "Esportivo",
            Self::Intimate => "Intimista",
        }
    }
}

impl std::fmt::Display for SpaceType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for SpaceType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for SpaceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| {
                t.as_str().eq_ignore_ascii_case(s)
                    || t.label().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| format!("invalid space type: {}", s))
    }
}
