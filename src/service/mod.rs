pub mod chat;
pub mod intents;
pub mod prompt;

pub use chat::ChatService;
