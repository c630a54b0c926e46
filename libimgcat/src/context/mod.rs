//! Caller context for policy decisions.

use serde::{Deserialize, Serialize};


/// Identity of the caller requesting an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Token of an authenticated request, if any.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Whether the caller has administrative rights.
    #[serde(default)]
    pub is_admin: bool,
    /// Project the caller is scoped to.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl RequestContext {
    /// Creates an anonymous, non-admin context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the authentication token.
    pub fn with_auth_token<S: Into<String>>(mut self, token: S) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the admin flag.
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Sets the project scope.
    pub fn with_project<S: Into<String>>(mut self, project_id: S) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Returns true if the request carries a non-empty token.
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns the project scope, treating an empty id as unscoped.
    pub fn project(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|p| !p.is_empty())
    }
}
