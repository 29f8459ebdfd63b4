use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::model::HashToken;

pub const SCRIPT_SRC: &str = "script-src";
pub const STYLE_SRC: &str = "style-src";
pub const STRICT_DYNAMIC: &str = "'strict-dynamic'";
pub const SELF_SOURCE: &str = "'self'";

/// Ordered mapping of CSP directive names to their source tokens.
///
/// Directive and token order are both kept as inserted. Names and tokens are opaque:
/// nothing is validated or quoted, so `'self'` has to be passed with its quotes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DirectiveSet {
    entries: Vec<Directive>,
}

/// A single directive, e.g. `object-src 'none'`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Directive {
    pub name: String,
    pub tokens: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum DirectiveParseError {
    #[error("Directive is empty")]
    Empty,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// `base-uri 'self';object-src 'none';script-src 'strict-dynamic';`
    pub fn strict() -> Self {
        let mut directive_set = Self::new();

        directive_set.insert("base-uri", [SELF_SOURCE]);
        directive_set.insert("object-src", ["'none'"]);
        directive_set.insert(SCRIPT_SRC, [STRICT_DYNAMIC]);
        directive_set
    }

    /// Replaces the tokens of an existing directive in its current position,
    /// or appends the directive if it isn't present yet.
    pub fn insert<N, I, T>(&mut self, name: N, tokens: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let name = name.into();
        let tokens = tokens.into_iter().map(Into::into).collect::<Vec<String>>();

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.tokens = tokens,
            None => self.entries.push(Directive { name, tokens }),
        }
    }

    /// Same as [`DirectiveSet::insert`], but leaves `self` untouched and returns the merged set.
    pub fn with_directive<N, I, T>(&self, name: N, tokens: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut merged = self.clone();

        merged.insert(name, tokens);
        merged
    }

    /// Appends style hashes to `style-src`, creating it as `'self'` when absent.
    pub fn with_style_hashes(&self, hashes: &[HashToken]) -> Self {
        if hashes.is_empty() {
            return self.clone();
        }

        let mut tokens = match self.get(STYLE_SRC) {
            Some(existing) => existing.to_vec(),
            None => vec![String::from(SELF_SOURCE)],
        };

        tokens.extend(hashes.iter().map(|hash| hash.as_str().to_owned()));
        self.with_directive(STYLE_SRC, tokens)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.tokens.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DirectiveSet {
    fn default() -> Self {
        Self::strict()
    }
}

impl Extend<Directive> for DirectiveSet {
    fn extend<I: IntoIterator<Item = Directive>>(&mut self, iter: I) {
        for directive in iter {
            self.insert(directive.name, directive.tokens);
        }
    }
}

impl<'set> IntoIterator for &'set DirectiveSet {
    type Item = &'set Directive;
    type IntoIter = std::slice::Iter<'set, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for DirectiveSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for directive in &self.entries {
            Display::fmt(directive, f)?;
        }

        Ok(())
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;

        for token in &self.tokens {
            f.write_str(" ")?;
            f.write_str(token)?;
        }

        f.write_str(";")
    }
}

impl FromStr for Directive {
    type Err = DirectiveParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.trim().trim_end_matches(';').split_whitespace();
        let name = parts.next().ok_or(DirectiveParseError::Empty)?;

        Ok(Self {
            name: String::from(name),
            tokens: parts.map(String::from).collect(),
        })
    }
}

impl serde::Serialize for DirectiveSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;

        for directive in &self.entries {
            map.serialize_entry(&directive.name, &directive.tokens)?;
        }

        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for DirectiveSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DirectiveSetVisitor)
    }
}

struct DirectiveSetVisitor;

impl<'de> serde::de::Visitor<'de> for DirectiveSetVisitor {
    type Value = DirectiveSet;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of directive names to lists of source tokens")
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut directive_set = DirectiveSet::new();

        while let Some((name, tokens)) = access.next_entry::<String, Vec<String>>()? {
            directive_set.insert(name, tokens);
        }

        Ok(directive_set)
    }
}
