//! Configuration surface for the chat module.
//!
//! Mirrors the deployment configuration keys: role separation, the entity
//! models backing users and agents, display and searchable columns, and the
//! conversation-creation toggles. Values are validated against the live
//! schema at service construction, not here.

use serde::Deserialize;

/// Chat configuration knobs.
///
/// Deserialisable from the host application's configuration store. All
/// fields have working defaults for a two-table deployment (`users` +
/// `agents`, labelled and searched by `name`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    enable_roles: bool,
    user_model: String,
    agent_model: String,
    user_chat_list_display_column: String,
    agent_chat_list_display_column: String,
    user_searchable_columns: Vec<String>,
    agent_searchable_columns: Vec<String>,
    skip_agent_selection: bool,
    allow_multiple_conversations: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enable_roles: false,
            user_model: "users".to_owned(),
            agent_model: "agents".to_owned(),
            user_chat_list_display_column: "name".to_owned(),
            agent_chat_list_display_column: "name".to_owned(),
            user_searchable_columns: vec!["name".to_owned()],
            agent_searchable_columns: vec!["name".to_owned()],
            skip_agent_selection: false,
            allow_multiple_conversations: false,
        }
    }
}

impl ChatConfig {
    /// Returns `true` when role separation between agents and customers is
    /// enabled.
    #[must_use]
    pub const fn roles_enabled(&self) -> bool {
        self.enable_roles
    }

    /// Returns the model backing user records.
    #[must_use]
    pub fn user_model(&self) -> &str {
        &self.user_model
    }

    /// Returns the model backing agent records.
    #[must_use]
    pub fn agent_model(&self) -> &str {
        &self.agent_model
    }

    /// Returns the column shown as a user's chat-list label.
    #[must_use]
    pub fn user_display_column(&self) -> &str {
        &self.user_chat_list_display_column
    }

    /// Returns the column shown as an agent's chat-list label.
    #[must_use]
    pub fn agent_display_column(&self) -> &str {
        &self.agent_chat_list_display_column
    }

    /// Returns the user columns matched by the search box, in OR order.
    #[must_use]
    pub fn user_searchable_columns(&self) -> &[String] {
        &self.user_searchable_columns
    }

    /// Returns the agent columns matched by the search box, in OR order.
    #[must_use]
    pub fn agent_searchable_columns(&self) -> &[String] {
        &self.agent_searchable_columns
    }

    /// Returns `true` when a missing receiver may be auto-assigned to a
    /// random agent.
    #[must_use]
    pub const fn skip_agent_selection(&self) -> bool {
        self.skip_agent_selection
    }

    /// Returns `true` when a participant pair may hold several conversations.
    #[must_use]
    pub const fn allow_multiple_conversations(&self) -> bool {
        self.allow_multiple_conversations
    }

    /// Enables or disables role separation.
    #[must_use]
    pub fn with_roles(mut self, enabled: bool) -> Self {
        self.enable_roles = enabled;
        self
    }

    /// Sets the model backing user records.
    #[must_use]
    pub fn with_user_model(mut self, model: impl Into<String>) -> Self {
        self.user_model = model.into();
        self
    }

    /// Sets the model backing agent records.
    #[must_use]
    pub fn with_agent_model(mut self, model: impl Into<String>) -> Self {
        self.agent_model = model.into();
        self
    }

    /// Sets the column shown as a user's chat-list label.
    #[must_use]
    pub fn with_user_display_column(mut self, column: impl Into<String>) -> Self {
        self.user_chat_list_display_column = column.into();
        self
    }

    /// Sets the column shown as an agent's chat-list label.
    #[must_use]
    pub fn with_agent_display_column(mut self, column: impl Into<String>) -> Self {
        self.agent_chat_list_display_column = column.into();
        self
    }

    /// Sets the user columns matched by the search box.
    #[must_use]
    pub fn with_user_searchable_columns(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.user_searchable_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the agent columns matched by the search box.
    #[must_use]
    pub fn with_agent_searchable_columns(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.agent_searchable_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables agent auto-assignment for missing receivers.
    #[must_use]
    pub fn with_skip_agent_selection(mut self, enabled: bool) -> Self {
        self.skip_agent_selection = enabled;
        self
    }

    /// Allows or disallows multiple conversations per participant pair.
    #[must_use]
    pub fn with_multiple_conversations(mut self, enabled: bool) -> Self {
        self.allow_multiple_conversations = enabled;
        self
    }
}
