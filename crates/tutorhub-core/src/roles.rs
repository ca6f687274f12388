//! The closed set of account roles and a compact set type over them.
//!
//! Features advertise which roles may see them as a [`RoleSet`]. It is stored
//! as a bitmask, so membership is exact: a role named `admin2` can never match
//! `admin`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Tutor,
    #[serde(alias = "peserta")]
    Participant,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Tutor, UserRole::Participant];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Tutor => "tutor",
            UserRole::Participant => "participant",
        }
    }

    const fn bit(self) -> i16 {
        match self {
            UserRole::Admin => 1,
            UserRole::Tutor => 1 << 1,
            UserRole::Participant => 1 << 2,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "tutor" => Ok(UserRole::Tutor),
            "participant" | "peserta" => Ok(UserRole::Participant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A set of [`UserRole`]s.
///
/// On the wire it is the comma-joined role list (`"admin,tutor"`); input may
/// also be a JSON array of role names. Order and whitespace are irrelevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(i16);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_bits(bits: i16) -> Self {
        let known = UserRole::ALL.iter().fold(0, |acc, r| acc | r.bit());
        Self(bits & known)
    }

    pub fn bits(&self) -> i16 {
        self.0
    }

    pub fn insert(&mut self, role: UserRole) {
        self.0 |= role.bit();
    }

    pub fn contains(&self, role: UserRole) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = UserRole> + '_ {
        UserRole::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<UserRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = UserRole>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl FromStr for RoleSet {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(UserRole::from_str)
            .collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Joined(String),
            List(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Joined(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::List(items) => items
                .iter()
                .map(|s| s.parse::<UserRole>())
                .collect::<Result<RoleSet, _>>()
                .map_err(serde::de::Error::custom),
        }
    }
}
