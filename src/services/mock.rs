// src/services/mock.rs
//! Canned supportive replies used when the Gemini integration is off.

use rand::{Rng, seq::SliceRandom};

pub const RESPONSES: [&str; 8] = [
    "I understand how challenging that can feel. Would you like to tell me more about what's been happening?",
    "Thank you for sharing that with me. It takes courage to express these feelings. How long have you been experiencing this?",
    "I hear you're going through a difficult time. Remember that it's okay to take things one step at a time. What's one small thing that might help you feel a bit better today?",
    "That sounds really tough. You're not alone in feeling this way, though I know it can seem isolating. What kinds of things have helped you cope in the past?",
    "I appreciate you opening up about this. Many people experience similar feelings. Would talking to a trusted friend or family member about this be an option for you?",
    "It makes sense that you'd feel that way given what you've described. I'm wondering if you've tried any relaxation techniques that might help in the moment?",
    "I'm here to listen whenever you need. Sometimes just expressing these thoughts can help provide some relief. Is there anything specific you'd like to explore more about what you're feeling?",
    "That's a lot to carry on your own. Remember that seeking help is a sign of strength, not weakness. Have you considered speaking with a mental health professional about these concerns?",
];

const QUOTE_LIMIT: usize = 30;
const ECHO_WORDS: usize = 3;

/// Opening placed in front of a canned response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    /// Quotes the start of the user's message.
    Quote,
    /// Echoes the first few words of the user's message.
    FirstWords,
    Fixed(&'static str),
}

pub const ACKNOWLEDGMENTS: [Acknowledgment; 6] = [
    Acknowledgment::Quote,
    Acknowledgment::FirstWords,
    Acknowledgment::Fixed("Regarding what you shared - "),
    Acknowledgment::Fixed("Thank you for telling me that. "),
    Acknowledgment::Fixed("I appreciate you sharing that. "),
    Acknowledgment::Fixed(""),
];

impl Acknowledgment {
    pub fn render(&self, user_message: &str) -> String {
        match self {
            Acknowledgment::Quote => {
                let head: String = user_message.chars().take(QUOTE_LIMIT).collect();
                let ellipsis = if user_message.chars().count() > QUOTE_LIMIT {
                    "..."
                } else {
                    ""
                };
                format!("About \"{head}{ellipsis}\" - ")
            }
            Acknowledgment::FirstWords => {
                let words: Vec<&str> = user_message.split_whitespace().take(ECHO_WORDS).collect();
                format!("I see what you mean about {}... ", words.join(" "))
            }
            Acknowledgment::Fixed(text) => text.to_string(),
        }
    }
}

pub fn reply(user_message: &str) -> String {
    reply_with(user_message, &mut rand::thread_rng())
}

pub fn reply_with<R: Rng + ?Sized>(user_message: &str, rng: &mut R) -> String {
    let acknowledgment = ACKNOWLEDGMENTS
        .choose(rng)
        .copied()
        .unwrap_or(Acknowledgment::Fixed(""));
    let body = RESPONSES.choose(rng).copied().unwrap_or(RESPONSES[0]);
    acknowledgment.render(user_message) + body
}
