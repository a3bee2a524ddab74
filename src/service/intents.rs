use crate::config::ChatConfig;
use crate::types::chat::{ChatButton, ChatResponse};

/// Whole-message greetings. Matched after lowercasing and trimming
/// punctuation, optionally followed by the assistant's name.
pub const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "hiya",
    "howdy",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "oli otya",
    "gyebale ko",
];

/// Case-insensitive substrings that route straight to the booking page.
pub const BOOKING_KEYWORDS: &[&str] = &[
    "book",
    "reserve",
    "reservation",
    "holiday package",
    "tour package",
    "plan my trip",
];

pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are the top destinations in Uganda?",
    "Tell me about Kampala",
    "What activities can I do in Uganda?",
    "Where should I stay?",
    "What should I know before travelling?",
];

const ASSISTANT_NAME: &str = "nambi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Booking,
    Question,
}

/// Ordered guard chain: greeting first, then booking, else a real question.
pub fn classify(question: &str) -> Intent {
    let normalized = normalize(question);
    if normalized.is_empty() || is_greeting(&normalized) {
        return Intent::Greeting;
    }
    if BOOKING_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        return Intent::Booking;
    }
    Intent::Question
}

fn normalize(question: &str) -> String {
    question
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_greeting(normalized: &str) -> bool {
    let without_name = normalized
        .strip_suffix(ASSISTANT_NAME)
        .map(str::trim_end)
        .unwrap_or(normalized);
    GREETING_KEYWORDS.contains(&without_name)
}

fn suggested_questions() -> Vec<String> {
    SUGGESTED_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

pub fn welcome_response(cfg: &ChatConfig) -> ChatResponse {
    ChatResponse {
        answer: "Hello! I'm Nambi, your Everything Uganda guide. Ask me about destinations, \
                 culture, activities, where to stay or travel tips."
            .to_string(),
        suggested_questions: suggested_questions(),
        action_buttons: vec![ChatButton::new("Explore Uganda", cfg.fallback_url.as_str())],
        quick_replies: vec!["Destinations".into(), "Culture".into(), "Book a trip".into()],
        ..ChatResponse::default()
    }
}

pub fn booking_response(cfg: &ChatConfig) -> ChatResponse {
    ChatResponse {
        answer: "I'd love to help you plan your trip! You can book a holiday package with \
                 Everything Uganda on our booking page."
            .to_string(),
        suggested_questions: suggested_questions(),
        booking_buttons: vec![ChatButton::new("Book a Holiday", cfg.booking_url.as_str())],
        show_booking_prompt: true,
        ..ChatResponse::default()
    }
}
