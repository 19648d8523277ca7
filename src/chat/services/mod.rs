//! Orchestration services for the chat module.

mod chat_list;

pub use chat_list::{ChatListService, NewConversationRequest};
