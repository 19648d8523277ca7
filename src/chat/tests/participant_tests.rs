//! Composite-key encoding and parsing tests.

use crate::chat::domain::{ParticipantKind, ParticipantRef};
use rstest::rstest;

#[rstest]
#[case(ParticipantRef::user(5), "user_5")]
#[case(ParticipantRef::agent(3), "agent_3")]
#[case(ParticipantRef::user(0), "user_0")]
#[case(ParticipantRef::agent(i64::MAX), "agent_9223372036854775807")]
fn composite_key_round_trips(#[case] participant: ParticipantRef, #[case] key: &str) {
    assert_eq!(participant.composite_key(), key);
    assert_eq!(ParticipantRef::parse(key), Some(participant));
}

#[rstest]
#[case("user_")]
#[case("agent_")]
#[case("user_x")]
#[case("agent_3x")]
#[case("USER_3")]
#[case("user_-3")]
#[case("user_3 ")]
#[case(" user_3")]
#[case("banana")]
#[case("")]
#[case("user_9223372036854775808")]
fn malformed_keys_are_rejected(#[case] key: &str) {
    assert_eq!(ParticipantRef::parse(key), None);
}

#[rstest]
fn parsed_kind_matches_prefix() {
    let user = ParticipantRef::parse("user_7").expect("valid user key");
    assert_eq!(user.kind(), ParticipantKind::User);
    assert_eq!(user.id(), 7);

    let agent = ParticipantRef::parse("agent_7").expect("valid agent key");
    assert_eq!(agent.kind(), ParticipantKind::Agent);
    assert_eq!(agent.id(), 7);

    // Same numeric id, different kind: distinct participants.
    assert_ne!(user, agent);
}

#[rstest]
fn kind_tags_round_trip() {
    for kind in [ParticipantKind::User, ParticipantKind::Agent] {
        assert_eq!(ParticipantKind::try_from(kind.as_str()), Ok(kind));
    }
    assert!(ParticipantKind::try_from("robot").is_err());
}

#[rstest]
fn display_matches_composite_key() {
    let participant = ParticipantRef::agent(42);
    assert_eq!(participant.to_string(), participant.composite_key());
}
