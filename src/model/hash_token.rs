use std::fmt::{Display, Formatter};

/// A CSP hash-source of the form `'sha256-<base64 digest>'`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HashToken(String);

impl HashToken {
    pub fn from_digest_base64(digest: &str) -> Self {
        Self(format!("'sha256-{digest}'"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for HashToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HashToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<HashToken> for String {
    fn from(token: HashToken) -> Self {
        token.0
    }
}
