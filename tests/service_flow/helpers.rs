//! Shared helpers for service flow tests.
//!
//! Builds a small support-desk world: a handful of users, two registered
//! agents, and a chat-list service wired over the in-memory adapters.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::io;
use std::sync::Arc;

use chatdesk::chat::{
    adapters::memory::{
        InMemoryConversationRepository, InMemoryDirectory, RecordingEventPublisher,
        RecordingNotifier,
    },
    config::ChatConfig,
    services::ChatListService,
};
use mockable::DefaultClock;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Concrete service type used by the flow tests.
pub type FlowService = ChatListService<
    InMemoryDirectory,
    InMemoryConversationRepository,
    RecordingEventPublisher,
    DefaultClock,
>;

/// The wired service together with handles to its recording adapters.
pub struct World {
    /// The service under test.
    pub service: FlowService,
    /// Conversation store handle for write-count assertions.
    pub repository: Arc<InMemoryConversationRepository>,
    /// Broadcast recorder handle.
    pub events: Arc<RecordingEventPublisher>,
    /// Notice recorder handle.
    pub notifier: RecordingNotifier,
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides the role-separated configuration used by most flow tests.
#[fixture]
pub fn roles_config() -> ChatConfig {
    ChatConfig::default()
        .with_roles(true)
        .with_user_searchable_columns(["name", "email"])
        .with_user_display_column("name")
        .with_agent_display_column("name")
}

/// Seeds the two-table directory with users and registered agents.
pub fn seeded_directory() -> InMemoryDirectory {
    let directory = InMemoryDirectory::new();
    directory
        .define_model("users", ["name", "email"])
        .expect("define users");
    directory
        .define_model("agents", ["name"])
        .expect("define agents");

    directory
        .insert("users", 1, [("name", "Priya"), ("email", "priya@example.test")])
        .expect("insert Priya");
    directory
        .insert("users", 2, [("name", "Marta"), ("email", "marta@example.test")])
        .expect("insert Marta");

    directory
        .insert("agents", 10, [("name", "Agent Idris")])
        .expect("insert Agent Idris");
    directory
        .insert("agents", 11, [("name", "Agent Noor")])
        .expect("insert Agent Noor");
    directory.register_agent(10).expect("register agent 10");
    directory.register_agent(11).expect("register agent 11");

    directory
}

/// Wires a service over the seeded directory with the given configuration.
pub fn build_world(rt: &Runtime, config: ChatConfig) -> World {
    let repository = Arc::new(InMemoryConversationRepository::new());
    let events = Arc::new(RecordingEventPublisher::new());
    let service = rt
        .block_on(ChatListService::new(
            config,
            Arc::new(seeded_directory()),
            Arc::clone(&repository),
            Arc::clone(&events),
            Arc::new(DefaultClock),
        ))
        .expect("valid configuration");

    World {
        service,
        repository,
        events,
        notifier: RecordingNotifier::new(),
    }
}
