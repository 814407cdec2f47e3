use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    PhoneNumber,
    Skype,
    Email,
    LinkedIn,
    Github,
    Stackoverflow,
    HomePage,
}

impl ContactType {
    pub const ALL: [ContactType; 7] = [
        ContactType::PhoneNumber,
        ContactType::Skype,
        ContactType::Email,
        ContactType::LinkedIn,
        ContactType::Github,
        ContactType::Stackoverflow,
        ContactType::HomePage,
    ];

    /// Stable wire name, identical to the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            ContactType::PhoneNumber => "PHONE_NUMBER",
            ContactType::Skype => "SKYPE",
            ContactType::Email => "EMAIL",
            ContactType::LinkedIn => "LINKED_IN",
            ContactType::Github => "GITHUB",
            ContactType::Stackoverflow => "STACKOVERFLOW",
            ContactType::HomePage => "HOME_PAGE",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ContactType::PhoneNumber => "Phone",
            ContactType::Skype => "Skype",
            ContactType::Email => "E-mail",
            ContactType::LinkedIn => "LinkedIn profile",
            ContactType::Github => "GitHub profile",
            ContactType::Stackoverflow => "Stack Overflow profile",
            ContactType::HomePage => "Home page",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContactType(pub String);

impl fmt::Display for UnknownContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown contact type '{}'", self.0)
    }
}

impl std::error::Error for UnknownContactType {}

impl FromStr for ContactType {
    type Err = UnknownContactType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownContactType(s.to_string()))
    }
}
