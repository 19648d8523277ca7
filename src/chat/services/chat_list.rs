//! Chat-list orchestration: search, label resolution, and conversation
//! creation.

use crate::chat::{
    config::ChatConfig,
    domain::{ActorContext, ParticipantKind, ParticipantRef, SearchHit, SearchResults},
    error::{ChatError, ConfigError, ValidationError},
    ports::{
        directory::{DirectoryEntry, IdScope, ParticipantDirectory, SearchCriteria},
        events::MessageEventPublisher,
        notifier::{Notice, UserNotifier},
        repository::{ConversationRepository, ExchangeRecord, NewExchange},
    },
};
use crate::chat::domain::MessageBody;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewConversationRequest {
    receiver_key: Option<String>,
    body: String,
}

impl NewConversationRequest {
    /// Creates a request with a message body and no receiver.
    ///
    /// Without a receiver key the request is only valid when agent
    /// auto-assignment applies.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            receiver_key: None,
            body: body.into(),
        }
    }

    /// Sets the receiver's composite key (`user_<id>` / `agent_<id>`).
    #[must_use]
    pub fn with_receiver_key(mut self, key: impl Into<String>) -> Self {
        self.receiver_key = Some(key.into());
        self
    }

    /// Returns the receiver's composite key, if supplied.
    #[must_use]
    pub fn receiver_key(&self) -> Option<&str> {
        self.receiver_key.as_deref()
    }

    /// Returns the message body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Chat-list orchestration service.
///
/// Holds the validated configuration and the ports it drives. Constructed
/// through [`ChatListService::new`], which fails fast on configuration that
/// does not match the live schema.
#[derive(Clone)]
pub struct ChatListService<D, R, P, C>
where
    D: ParticipantDirectory,
    R: ConversationRepository,
    P: MessageEventPublisher + 'static,
    C: Clock + Send + Sync,
{
    config: ChatConfig,
    directory: Arc<D>,
    repository: Arc<R>,
    events: Arc<P>,
    clock: Arc<C>,
}

impl<D, R, P, C> ChatListService<D, R, P, C>
where
    D: ParticipantDirectory,
    R: ConversationRepository,
    P: MessageEventPublisher + 'static,
    C: Clock + Send + Sync,
{
    /// Creates the service, validating the configuration against the live
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModel`] when a configured model has no
    /// backing table, and [`ConfigError::MissingColumn`] when a configured
    /// searchable column is absent from its table.
    pub async fn new(
        config: ChatConfig,
        directory: Arc<D>,
        repository: Arc<R>,
        events: Arc<P>,
        clock: Arc<C>,
    ) -> Result<Self, ConfigError> {
        for model in [config.user_model(), config.agent_model()] {
            if !directory.model_exists(model).await? {
                return Err(ConfigError::UnknownModel(model.to_owned()));
            }
        }
        for (model, columns) in [
            (config.user_model(), config.user_searchable_columns()),
            (config.agent_model(), config.agent_searchable_columns()),
        ] {
            for column in columns {
                if !directory.column_exists(model, column).await? {
                    return Err(ConfigError::MissingColumn {
                        model: model.to_owned(),
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(Self {
            config,
            directory,
            repository,
            events,
            clock,
        })
    }

    /// Returns the validated configuration.
    #[must_use]
    pub const fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Searches users/agents for the chat-list search box.
    ///
    /// Who is searchable depends on role separation: agents search users
    /// (never other agents), users search agents. Without role separation
    /// everyone except the actor is searchable; with distinct user and agent
    /// models both are searched, user results first.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Directory`] when a query fails. An empty result
    /// set is `Ok`, never an error.
    pub async fn search(
        &self,
        actor: &ActorContext,
        term: &str,
    ) -> Result<SearchResults, ChatError> {
        if self.config.roles_enabled() {
            let agent_ids = self.directory.agent_ids().await?;

            if actor.is_agent() {
                let criteria = self.user_criteria(term, IdScope::Excluding(agent_ids));
                let entries = self
                    .directory
                    .search(self.config.user_model(), &criteria)
                    .await?;
                return Ok(into_results(ParticipantKind::User, entries));
            }

            let criteria = self.agent_criteria(term, IdScope::Within(agent_ids));
            let entries = self
                .directory
                .search(self.config.agent_model(), &criteria)
                .await?;
            return Ok(into_results(ParticipantKind::Agent, entries));
        }

        let own_id = vec![actor.id()];
        if self.config.user_model() == self.config.agent_model() {
            let criteria = self.user_criteria(term, IdScope::Excluding(own_id));
            let entries = self
                .directory
                .search(self.config.user_model(), &criteria)
                .await?;
            return Ok(into_results(ParticipantKind::User, entries));
        }

        let user_criteria = self.user_criteria(term, IdScope::Excluding(own_id.clone()));
        let users = self
            .directory
            .search(self.config.user_model(), &user_criteria)
            .await?;
        let agent_criteria = self.agent_criteria(term, IdScope::Excluding(own_id));
        let agents = self
            .directory
            .search(self.config.agent_model(), &agent_criteria)
            .await?;

        Ok(into_results(ParticipantKind::User, users)
            .merged(into_results(ParticipantKind::Agent, agents)))
    }

    /// Resolves a composite key to its current display label.
    ///
    /// Returns `None` when the key matches neither pattern or the row does
    /// not exist; a missing record is "not found", not a fault.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Directory`] when the lookup query fails.
    pub async fn option_label(&self, key: &str) -> Result<Option<String>, ChatError> {
        let Some(participant) = ParticipantRef::parse(key) else {
            return Ok(None);
        };

        let (model, column) = match participant.kind() {
            ParticipantKind::User => (self.config.user_model(), self.config.user_display_column()),
            ParticipantKind::Agent => {
                (self.config.agent_model(), self.config.agent_display_column())
            }
        };
        Ok(self
            .directory
            .display_label(model, participant.id(), column)
            .await?)
    }

    /// Creates or reuses a conversation and appends the message, publishing
    /// a broadcast event as part of the same atomic exchange.
    ///
    /// All validation happens before any write; the write sequence and the
    /// event publish execute as one atomic repository operation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Validation`] for bad input (no writes were
    /// attempted), and [`ChatError::Repository`] or [`ChatError::Event`]
    /// when the exchange fails (all writes rolled back, including on a
    /// failed publish).
    pub async fn create_conversation(
        &self,
        actor: &ActorContext,
        request: &NewConversationRequest,
    ) -> Result<ExchangeRecord, ChatError> {
        let body = MessageBody::new(request.body()).map_err(ChatError::Validation)?;
        let receiver = self.resolve_receiver(actor, request.receiver_key()).await?;
        if receiver == actor.participant() {
            return Err(ValidationError::SelfConversation.into());
        }

        let exchange = NewExchange::new(actor.participant(), receiver, body)
            .with_reuse(!self.config.allow_multiple_conversations());
        let events: Arc<dyn MessageEventPublisher> = self.events.clone();
        let record = self
            .repository
            .start_exchange(&exchange, self.clock.utc(), events)
            .await?;

        Ok(record)
    }

    /// Top-level entry point: creates the conversation and reports failures
    /// to the acting user.
    ///
    /// Full error detail is logged server-side; the notice shown to the user
    /// carries either the validation message (safe by construction) or a
    /// generic body, never internal detail.
    pub async fn submit(
        &self,
        actor: &ActorContext,
        request: &NewConversationRequest,
        notifier: &dyn UserNotifier,
    ) -> Option<ExchangeRecord> {
        match self.create_conversation(actor, request).await {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::error!(error = %error, actor_id = actor.id(), "conversation creation failed");
                notifier
                    .notify(&Notice::danger("Something went wrong", user_facing_body(&error)))
                    .await;
                None
            }
        }
    }

    async fn resolve_receiver(
        &self,
        actor: &ActorContext,
        receiver_key: Option<&str>,
    ) -> Result<ParticipantRef, ChatError> {
        let Some(key) = receiver_key else {
            if !self.config.roles_enabled()
                || actor.is_agent()
                || !self.config.skip_agent_selection()
            {
                return Err(ValidationError::ReceiverRequired.into());
            }
            let id = self
                .directory
                .random_agent_id()
                .await?
                .ok_or(ValidationError::NoAgentAvailable)?;
            return Ok(ParticipantRef::agent(id));
        };

        ParticipantRef::parse(key)
            .ok_or_else(|| ValidationError::UnrecognisedReceiverKey(key.to_owned()).into())
    }

    fn user_criteria(&self, term: &str, scope: IdScope) -> SearchCriteria {
        SearchCriteria::new(
            term,
            self.config.user_searchable_columns().iter().cloned(),
            self.config.user_display_column(),
            scope,
        )
    }

    fn agent_criteria(&self, term: &str, scope: IdScope) -> SearchCriteria {
        SearchCriteria::new(
            term,
            self.config.agent_searchable_columns().iter().cloned(),
            self.config.agent_display_column(),
            scope,
        )
    }
}

fn into_results(kind: ParticipantKind, entries: Vec<DirectoryEntry>) -> SearchResults {
    SearchResults::from_hits(
        entries
            .into_iter()
            .map(|entry| SearchHit::new(ParticipantRef::new(kind, entry.id), entry.label))
            .collect(),
    )
}

fn user_facing_body(error: &ChatError) -> String {
    match error {
        ChatError::Validation(validation) => validation.to_string(),
        _ => "The conversation could not be created. Please try again.".to_owned(),
    }
}
