//! Failure reporting through the notifier, exercised end to end.

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
    config::ChatConfig,
    domain::ActorContext,
    ports::notifier::NoticeSeverity,
    services::NewConversationRequest,
};
use rstest::rstest;
use tokio::runtime::Runtime;

use crate::service_flow::helpers::{build_world, roles_config, runtime};

/// A bad receiver key produces one danger notice and no writes.
#[rstest]
fn bad_receiver_key_is_reported_without_writes(
    runtime: io::Result<Runtime>,
    roles_config: ChatConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let world = build_world(&rt, roles_config);

    let outcome = rt.block_on(world.service.submit(
        &ActorContext::user(1),
        &NewConversationRequest::new("hi").with_receiver_key("agent_ten"),
        &world.notifier,
    ));

    assert!(outcome.is_none());
    assert_eq!(world.repository.conversation_count(), 0);
    assert!(world.events.events().is_empty());

    let notices = world.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity(), NoticeSeverity::Danger);
    assert_eq!(notices[0].title(), "Something went wrong");
    assert_eq!(notices[0].body(), "unrecognised receiver key 'agent_ten'");
    Ok(())
}

/// An empty message body never reaches the store.
#[rstest]
fn blank_body_is_reported_without_writes(
    runtime: io::Result<Runtime>,
    roles_config: ChatConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let world = build_world(&rt, roles_config);

    let outcome = rt.block_on(world.service.submit(
        &ActorContext::user(1),
        &NewConversationRequest::new("   ").with_receiver_key("agent_10"),
        &world.notifier,
    ));

    assert!(outcome.is_none());
    assert_eq!(world.repository.message_count(), 0);
    assert_eq!(world.notifier.notices().len(), 1);
    assert_eq!(world.notifier.notices()[0].body(), "message body cannot be empty");
    Ok(())
}
