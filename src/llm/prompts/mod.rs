// ABOUTME: System prompts and fallback replies for the Mari AI coach
// ABOUTME: Persona loaded at compile time; apology strings for masked failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # System Prompts
//!
//! The Mari persona prompt is loaded at compile time from a markdown file for
//! easy maintenance. The fallback replies mask upstream failures: the proxy
//! never surfaces a raw AI error to the user, it answers with one of these
//! static strings and records the turn as if it had succeeded.

/// Mari wellness assistant system prompt
pub const MARI_SYSTEM_PROMPT: &str = include_str!("mari_system.md");

/// Get the system prompt for the Mari wellness assistant
///
/// The persona is prepended to every user message; the upstream call is
/// stateless so the prompt travels with each turn.
#[must_use]
pub const fn get_mari_system_prompt() -> &'static str {
    MARI_SYSTEM_PROMPT
}

/// Which failure produced the fallback reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// Provider misconfigured or transport-level failure
    Unavailable,
    /// Upstream answered but produced no usable reply
    EmptyReply,
    /// Anything else that went wrong mid-turn
    Unexpected,
}

/// Static user-facing apology for a masked upstream failure
#[must_use]
pub const fn fallback_reply(kind: FallbackKind) -> &'static str {
    match kind {
        FallbackKind::Unavailable => {
            "Desculpe, estou com dificuldades técnicas. Tente novamente em alguns instantes! 😊"
        }
        FallbackKind::EmptyReply => {
            "Não consegui processar sua mensagem. Tente reformular sua pergunta! 💪"
        }
        FallbackKind::Unexpected => "Ops! Algo deu errado. Tente novamente! 🙂",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_prompt_is_nonempty() {
        assert!(MARI_SYSTEM_PROMPT.contains("Mari"));
        assert!(MARI_SYSTEM_PROMPT.len() > 100);
    }

    #[test]
    fn test_fallback_replies_are_nonempty_and_distinct() {
        let replies = [
            fallback_reply(FallbackKind::Unavailable),
            fallback_reply(FallbackKind::EmptyReply),
            fallback_reply(FallbackKind::Unexpected),
        ];
        for reply in replies {
            assert!(!reply.is_empty());
        }
        assert_ne!(replies[0], replies[1]);
        assert_ne!(replies[1], replies[2]);
    }
}
