//! Weather chat core: intent parsing, location resolution and replies

pub mod alias;
pub mod intent;
pub mod reply;
pub mod resolver;
pub mod service;

pub use alias::AliasTable;
pub use intent::{Day, Intent, IntentParser};
pub use resolver::{LocationResolver, Resolution};
pub use service::{ChatMeta, ChatReply, ChatService};
