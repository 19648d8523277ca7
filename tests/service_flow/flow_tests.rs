//! Search-to-conversation flows exercised through the public API.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use std::io;

use chatdesk::chat::{
    domain::{ActorContext, ParticipantKind},
    ports::repository::ConversationRepository,
    services::NewConversationRequest,
};
use rstest::rstest;
use tokio::runtime::Runtime;

use crate::service_flow::helpers::{build_world, roles_config, runtime};
use chatdesk::chat::config::ChatConfig;

/// A user searches the agent roster, picks an option, starts a conversation,
/// and a second message lands in the same thread.
#[rstest]
fn search_create_and_reuse(
    runtime: io::Result<Runtime>,
    roles_config: ChatConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let world = build_world(&rt, roles_config);
    let actor = ActorContext::user(1);

    let results = rt.block_on(world.service.search(&actor, "idris"))?;
    let options = results.options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].1, "Agent Idris");
    let receiver_key = options[0].0.clone();
    assert_eq!(receiver_key, "agent_10");

    let opened = rt.block_on(world.service.create_conversation(
        &actor,
        &NewConversationRequest::new("My invoice is wrong").with_receiver_key(&receiver_key),
    ))?;
    assert!(!opened.reused());

    let followed_up = rt.block_on(world.service.create_conversation(
        &actor,
        &NewConversationRequest::new("Any update?").with_receiver_key(&receiver_key),
    ))?;
    assert!(followed_up.reused());
    assert_eq!(followed_up.conversation().id(), opened.conversation().id());

    assert_eq!(world.repository.conversation_count(), 1);
    assert_eq!(world.repository.message_count(), 2);
    assert_eq!(world.events.events().len(), 2);
    Ok(())
}

/// The option key handed out by search resolves back to the same label.
#[rstest]
fn search_option_key_round_trips_through_label_lookup(
    runtime: io::Result<Runtime>,
    roles_config: ChatConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let world = build_world(&rt, roles_config);

    let results = rt.block_on(world.service.search(&ActorContext::user(1), "noor"))?;
    let options = results.options();
    assert_eq!(options.len(), 1);

    let label = rt.block_on(world.service.option_label(&options[0].0))?;
    assert_eq!(label.as_deref(), Some(options[0].1.as_str()));
    Ok(())
}

/// With agent selection skipped, submitting without a receiver assigns a
/// registered agent and records the exchange.
#[rstest]
fn submission_without_receiver_auto_assigns_an_agent(
    runtime: io::Result<Runtime>,
    roles_config: ChatConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let world = build_world(&rt, roles_config.with_skip_agent_selection(true));

    let record = rt
        .block_on(world.service.submit(
            &ActorContext::user(2),
            &NewConversationRequest::new("Hello, I need help"),
            &world.notifier,
        ))
        .expect("submission should succeed");

    let receiver = record.conversation().receiver();
    assert_eq!(receiver.kind(), ParticipantKind::Agent);
    assert!([10, 11].contains(&receiver.id()));
    assert!(world.notifier.notices().is_empty());
    assert_eq!(world.events.events().len(), 1);
    Ok(())
}

/// Both participants drive the same thread from their own side.
#[rstest]
fn agent_reply_lands_in_the_users_thread(
    runtime: io::Result<Runtime>,
    roles_config: ChatConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let world = build_world(&rt, roles_config);

    let opened = rt.block_on(world.service.create_conversation(
        &ActorContext::user(1),
        &NewConversationRequest::new("Order 5512 never arrived").with_receiver_key("agent_10"),
    ))?;

    let reply = rt.block_on(world.service.create_conversation(
        &ActorContext::agent(10),
        &NewConversationRequest::new("Looking into it now").with_receiver_key("user_1"),
    ))?;

    assert!(reply.reused());
    assert_eq!(reply.conversation().id(), opened.conversation().id());

    let messages = rt.block_on(world.repository.messages(opened.conversation().id()))?;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender().composite_key(), "user_1");
    assert_eq!(messages[1].sender().composite_key(), "agent_10");
    Ok(())
}
