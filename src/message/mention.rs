use std::{borrow::Cow, fmt};

use super::blocks::MarkdownConvertible;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    /// `U0123` becomes `<@U0123>`
    User(String),
    /// User group id, `S0123` becomes `<!subteam^S0123>`
    Subgroup(String),
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mention::User(user) => write!(f, "<@{}>", user),
            Mention::Subgroup(group) => write!(f, "<!subteam^{}>", group),
        }
    }
}

impl MarkdownConvertible for Mention {
    fn markdown(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}
