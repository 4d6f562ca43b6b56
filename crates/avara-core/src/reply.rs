//! USSD reply type — the entire state-machine signal of the protocol.
//!
//! A session has exactly two states: `CON` (the gateway expects further
//! input and will re-send the full accumulated step path) and `END`
//! (absorbing — the client starts a fresh empty-path session next time).
//! There is no server-held session object to expire.

/// A USSD response directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Continue the session — the body is a menu prompt.
    Con(String),
    /// Terminate the session — the body is the final user-visible message.
    End(String),
}

impl Reply {
    /// Build a `CON` reply.
    pub fn con(body: impl Into<String>) -> Self {
        Self::Con(body.into())
    }

    /// Build an `END` reply.
    pub fn end(body: impl Into<String>) -> Self {
        Self::End(body.into())
    }

    /// Render the wire form expected by the gateway (`CON …` / `END …`).
    pub fn render(&self) -> String {
        match self {
            Self::Con(body) => format!("CON {body}"),
            Self::End(body) => format!("END {body}"),
        }
    }

    /// The final user-visible message, present only for terminal replies.
    ///
    /// This is what the notification dispatcher sends via SMS.
    pub fn final_message(&self) -> Option<&str> {
        match self {
            Self::Con(_) => None,
            Self::End(body) => Some(body.trim()),
        }
    }

    /// Whether this reply terminates the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn con_renders_with_prefix() {
        let reply = Reply::con("Welcome");
        assert_eq!(reply.render(), "CON Welcome");
    }

    #[test]
    fn end_renders_with_prefix() {
        let reply = Reply::end("Goodbye");
        assert_eq!(reply.render(), "END Goodbye");
    }

    #[test]
    fn multiline_body_preserved() {
        let reply = Reply::con("Line one\nLine two");
        assert_eq!(reply.render(), "CON Line one\nLine two");
    }

    #[test]
    fn final_message_only_for_end() {
        assert_eq!(Reply::con("menu").final_message(), None);
        assert_eq!(Reply::end("done").final_message(), Some("done"));
    }

    #[test]
    fn final_message_is_trimmed() {
        let reply = Reply::end("  spaced out  ");
        assert_eq!(reply.final_message(), Some("spaced out"));
    }

    #[test]
    fn terminal_flag() {
        assert!(!Reply::con("x").is_terminal());
        assert!(Reply::end("x").is_terminal());
    }
}
