//! Conversation creation tests: creation, reuse, auto-assignment, and
//! validation failures with zero committed writes.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use super::fixtures::{harness, harness_with_directory, roles_config, seeded_directory};
use crate::chat::adapters::memory::{
    InMemoryConversationRepository, InMemoryDirectory, RecordingEventPublisher,
};
use crate::chat::config::ChatConfig;
use crate::chat::domain::{ActorContext, ParticipantKind, ParticipantRef};
use crate::chat::error::{ChatError, ValidationError};
use crate::chat::ports::repository::ConversationRepository;
use crate::chat::services::{ChatListService, NewConversationRequest};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

mockall::mock! {
    SteppedClock {}

    impl Clock for SteppedClock {
        fn local(&self) -> DateTime<Local>;
        fn utc(&self) -> DateTime<Utc>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creates_conversation_message_and_event() {
    let fixture = harness(roles_config()).await;
    let actor = ActorContext::user(7);
    let request = NewConversationRequest::new("hi").with_receiver_key("agent_3");

    let record = fixture
        .service
        .create_conversation(&actor, &request)
        .await
        .expect("creation should succeed");

    assert!(!record.reused());
    assert_eq!(record.conversation().sender(), ParticipantRef::user(7));
    assert_eq!(record.conversation().receiver(), ParticipantRef::agent(3));
    assert_eq!(record.message().body().as_str(), "hi");
    assert_eq!(record.message().conversation_id(), record.conversation().id());

    assert_eq!(fixture.repository.conversation_count(), 1);
    assert_eq!(fixture.repository.message_count(), 1);

    let events = fixture.events.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].conversation_id(), record.conversation().id());
    assert_eq!(events[0].message_id(), record.message().id());
    assert_eq!(events[0].receiver(), ParticipantRef::agent(3));
    assert_eq!(events[0].sender(), ParticipantRef::user(7));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_exchange_reuses_the_conversation() {
    let fixture = harness(roles_config()).await;
    let actor = ActorContext::user(7);

    let first = fixture
        .service
        .create_conversation(
            &actor,
            &NewConversationRequest::new("hi").with_receiver_key("agent_3"),
        )
        .await
        .expect("first creation should succeed");
    let second = fixture
        .service
        .create_conversation(
            &actor,
            &NewConversationRequest::new("again").with_receiver_key("agent_3"),
        )
        .await
        .expect("second creation should succeed");

    assert!(second.reused());
    assert_eq!(second.conversation().id(), first.conversation().id());

    assert_eq!(fixture.repository.conversation_count(), 1);
    assert_eq!(fixture.repository.message_count(), 2);

    let messages = fixture
        .repository
        .messages(first.conversation().id())
        .await
        .expect("messages query should succeed");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body().as_str(), "hi");
    assert_eq!(messages[1].body().as_str(), "again");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reuse_strictly_refreshes_updated_at() {
    let opened_at = Utc
        .with_ymd_and_hms(2026, 3, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp");

    // Each clock reading steps forward by thirty seconds.
    let mut clock = MockSteppedClock::new();
    let calls = AtomicI64::new(0);
    clock.expect_utc().returning(move || {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        opened_at + Duration::seconds(30 * call)
    });

    let repository = Arc::new(InMemoryConversationRepository::new());
    let service = ChatListService::new(
        roles_config(),
        Arc::new(seeded_directory()),
        Arc::clone(&repository),
        Arc::new(RecordingEventPublisher::new()),
        Arc::new(clock),
    )
    .await
    .expect("valid configuration");
    let actor = ActorContext::user(7);

    let first = service
        .create_conversation(
            &actor,
            &NewConversationRequest::new("hi").with_receiver_key("agent_3"),
        )
        .await
        .expect("first creation should succeed");
    let second = service
        .create_conversation(
            &actor,
            &NewConversationRequest::new("again").with_receiver_key("agent_3"),
        )
        .await
        .expect("second creation should succeed");

    assert!(second.reused());
    assert_eq!(first.conversation().updated_at(), opened_at);
    assert_eq!(second.conversation().created_at(), opened_at);
    assert_eq!(
        second.conversation().updated_at(),
        opened_at + Duration::seconds(30)
    );
    assert!(second.conversation().updated_at() > first.conversation().updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reuse_matches_the_reversed_orientation() {
    let fixture = harness(roles_config()).await;

    let opened = fixture
        .service
        .create_conversation(
            &ActorContext::user(7),
            &NewConversationRequest::new("hi").with_receiver_key("agent_3"),
        )
        .await
        .expect("creation should succeed");

    // The agent replies towards the user: same unordered pair, same thread.
    let reply = fixture
        .service
        .create_conversation(
            &ActorContext::agent(3),
            &NewConversationRequest::new("hello back").with_receiver_key("user_7"),
        )
        .await
        .expect("reply should succeed");

    assert!(reply.reused());
    assert_eq!(reply.conversation().id(), opened.conversation().id());
    assert_eq!(fixture.repository.conversation_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn multiple_conversations_mode_opens_a_fresh_thread() {
    let fixture = harness(roles_config().with_multiple_conversations(true)).await;
    let actor = ActorContext::user(7);

    for body in ["hi", "again"] {
        fixture
            .service
            .create_conversation(
                &actor,
                &NewConversationRequest::new(body).with_receiver_key("agent_3"),
            )
            .await
            .expect("creation should succeed");
    }

    assert_eq!(fixture.repository.conversation_count(), 2);
    assert_eq!(fixture.repository.message_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_receiver_without_auto_assignment_is_rejected() {
    // Roles disabled: auto-assignment never applies.
    let fixture = harness(ChatConfig::default()).await;

    let result = fixture
        .service
        .create_conversation(&ActorContext::user(7), &NewConversationRequest::new("hi"))
        .await;

    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::ReceiverRequired))
    ));
    assert_eq!(fixture.repository.conversation_count(), 0);
    assert_eq!(fixture.repository.message_count(), 0);
    assert!(fixture.events.events().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_actor_never_gets_auto_assignment() {
    let fixture = harness(roles_config().with_skip_agent_selection(true)).await;

    let result = fixture
        .service
        .create_conversation(&ActorContext::agent(3), &NewConversationRequest::new("hi"))
        .await;

    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::ReceiverRequired))
    ));
    assert_eq!(fixture.repository.conversation_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_receiver_is_auto_assigned_to_a_registered_agent() {
    let fixture = harness(roles_config().with_skip_agent_selection(true)).await;

    let record = fixture
        .service
        .create_conversation(&ActorContext::user(7), &NewConversationRequest::new("hi"))
        .await
        .expect("auto-assigned creation should succeed");

    let receiver = record.conversation().receiver();
    assert_eq!(receiver.kind(), ParticipantKind::Agent);
    assert!([3, 4].contains(&receiver.id()));
    assert_eq!(fixture.repository.message_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn auto_assignment_with_empty_registry_is_rejected() {
    let directory = InMemoryDirectory::new();
    directory
        .define_model("users", ["name", "email"])
        .expect("define users");
    directory
        .define_model("agents", ["name"])
        .expect("define agents");
    let fixture = harness_with_directory(
        roles_config().with_skip_agent_selection(true),
        directory,
    )
    .await;

    let result = fixture
        .service
        .create_conversation(&ActorContext::user(7), &NewConversationRequest::new("hi"))
        .await;

    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::NoAgentAvailable))
    ));
    assert_eq!(fixture.repository.conversation_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrecognised_receiver_key_is_rejected_before_any_write() {
    let fixture = harness(roles_config()).await;

    let result = fixture
        .service
        .create_conversation(
            &ActorContext::user(7),
            &NewConversationRequest::new("hi").with_receiver_key("banana"),
        )
        .await;

    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::UnrecognisedReceiverKey(key))) if key == "banana"
    ));
    assert_eq!(fixture.repository.conversation_count(), 0);
    assert!(fixture.events.events().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_body_is_rejected_before_any_write() {
    let fixture = harness(roles_config()).await;

    let result = fixture
        .service
        .create_conversation(
            &ActorContext::user(7),
            &NewConversationRequest::new("   ").with_receiver_key("agent_3"),
        )
        .await;

    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::EmptyMessageBody))
    ));
    assert_eq!(fixture.repository.message_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_with_oneself_is_rejected() {
    let fixture = harness(ChatConfig::default()).await;

    let result = fixture
        .service
        .create_conversation(
            &ActorContext::user(7),
            &NewConversationRequest::new("hi").with_receiver_key("user_7"),
        )
        .await;

    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::SelfConversation))
    ));
    assert_eq!(fixture.repository.conversation_count(), 0);
}
