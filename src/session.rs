//! Explicit session context
//!
//! Everything a screen would otherwise read from ambient browser storage
//! (the bearer token, the signed-in user's name, the title of an entity
//! created on another page) is carried here and handed to whoever needs it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ids::ItemId;
use crate::error::{Result, TaskboardError};

/// An item created elsewhere that should appear on the board when it opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub id: ItemId,
    pub title: String,
}

/// The project selected on the dashboard, handed to the task board screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProject {
    pub id: u64,
    pub title: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing)]
    token: Option<String>,
    user_name: Option<String>,
    seed_item: Option<SeedItem>,
    selected_project: Option<SelectedProject>,
}

impl Session {
    const DEFAULT_USER_NAME: &'static str = "User";

    /// Creates a session without credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a session for a signed-in user
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn with_seed_item(mut self, seed: SeedItem) -> Self {
        self.seed_item = Some(seed);
        self
    }

    pub fn with_selected_project(mut self, project: SelectedProject) -> Self {
        self.selected_project = Some(project);
        self
    }

    /// Returns the bearer token, or `NotAuthenticated` when signed out
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(TaskboardError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_ok()
    }

    /// Greeting name, "User" when unknown
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .unwrap_or(Self::DEFAULT_USER_NAME)
    }

    pub fn selected_project(&self) -> Option<&SelectedProject> {
        self.selected_project.as_ref()
    }

    /// Takes the pending seed item. It is consumed so a second board opened
    /// in the same session does not receive it again.
    pub fn take_seed_item(&mut self) -> Option<SeedItem> {
        self.seed_item.take()
    }

    /// Drops the credentials after the backend rejected them
    pub fn logout(&mut self) {
        self.token = None;
        self.user_name = None;
    }
}

// The token never appears in debug output or logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_name", &self.user_name)
            .field("seed_item", &self.seed_item)
            .field("selected_project", &self.selected_project)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_anonymous_session_has_no_token() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.token(),
            Err(TaskboardError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_blank_token_is_not_authenticated() {
        let session = Session::with_token("  ");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_token() {
        let session = Session::with_token("abc123");
        assert_eq!(session.token().unwrap(), "abc123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::with_token("abc123").with_user_name("Ada");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("Ada"));

        let debug = format!("{:?}", Session::anonymous());
        assert!(debug.contains("token: None"));
    }

    #[test]
    fn test_serialization_skips_token() {
        let session = Session::with_token("abc123").with_user_name("Ada");
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("abc123"));
        assert!(!json.contains("token"));

        let restored: Session = serde_json::from_str(&json).unwrap();
        assert!(!restored.is_authenticated());
        assert_eq!(restored.display_name(), "Ada");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Session::anonymous().display_name(), "User");
        let session = Session::with_token("t").with_user_name("Ada Lovelace");
        assert_eq!(session.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_seed_item_is_consumed_once() {
        let mut session = Session::anonymous().with_seed_item(SeedItem {
            id: ItemId::from_str("42").unwrap(),
            title: "Write report".to_string(),
        });

        assert!(session.take_seed_item().is_some());
        assert!(session.take_seed_item().is_none());
    }

    #[test]
    fn test_selected_project() {
        let session = Session::with_token("t").with_selected_project(SelectedProject {
            id: 4,
            title: "Website".to_string(),
        });
        assert_eq!(session.selected_project().unwrap().id, 4);
        assert!(Session::anonymous().selected_project().is_none());
    }

    #[test]
    fn test_logout_clears_credentials() {
        let mut session = Session::with_token("t").with_user_name("Ada");
        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name(), "User");
    }
}
