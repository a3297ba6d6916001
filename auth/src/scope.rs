use std::collections::BTreeSet;

/// Scopes a protected operation demands from the presented token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRequirement {
    scopes: BTreeSet<String>,
}

impl ScopeRequirement {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Requirement met by any authenticated principal.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    /// True iff every required scope is among `granted`.
    pub fn is_satisfied_by(&self, granted: &BTreeSet<String>) -> bool {
        self.scopes.is_subset(granted)
    }

    /// Space-separated scope string, as used on the wire.
    pub fn scope_string(&self) -> String {
        self.scopes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `WWW-Authenticate` challenge naming the scopes being checked.
    pub fn challenge(&self) -> String {
        if self.is_empty() {
            "Bearer".to_string()
        } else {
            format!("Bearer scope=\"{}\"", self.scope_string())
        }
    }
}

/// Split the form-encoded OAuth2 `scope` parameter into individual scopes.
pub fn parse_scope_param(raw: &str) -> BTreeSet<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
