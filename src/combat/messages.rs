//! Verb templates combat narration is built from
//!
//! A template carries every verb form the narrator needs so one template
//! serves "You hit the ninja.", "The ninja hits you.", and plural subjects.

use serde::{Deserialize, Serialize};

/// Verb forms plus optional sentence fragments for one narrated action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    /// Second-person form ("hit")
    pub second: String,
    /// Third-person singular form ("hits")
    pub third_singular: String,
    /// Third-person plural form ("hit")
    pub third_plural: String,
    /// Fragment between verb and object, e.g. " at"
    pub mid: String,
    /// Fragment after the object, e.g. " off the wall"
    pub tail: String,
}

impl MessageTemplate {
    /// Template for a regular verb: third-singular derives by appending "s",
    /// third-plural matches the second-person form.
    pub fn verb(second: &str) -> Self {
        Self {
            second: second.to_string(),
            third_singular: format!("{second}s"),
            third_plural: second.to_string(),
            mid: String::new(),
            tail: String::new(),
        }
    }

    pub fn with_third_singular(mut self, form: &str) -> Self {
        self.third_singular = form.to_string();
        self
    }

    pub fn with_mid(mut self, fragment: &str) -> Self {
        self.mid = fragment.to_string();
        self
    }

    pub fn with_tail(mut self, fragment: &str) -> Self {
        self.tail = fragment.to_string();
        self
    }
}

/// "hit" / "hits"
pub fn hit() -> MessageTemplate {
    MessageTemplate::verb("hit")
}

/// "miss" / "misses"
pub fn miss() -> MessageTemplate {
    MessageTemplate::verb("miss").with_third_singular("misses")
}

/// "die" / "dies"
pub fn die() -> MessageTemplate {
    MessageTemplate::verb("die")
}

/// "lunge at ..." - attempt announcement for the follow-through attack
pub fn lunge() -> MessageTemplate {
    MessageTemplate::verb("lunge").with_mid(" at")
}

/// "spring off the wall" - the wall-jump special move
pub fn spring() -> MessageTemplate {
    MessageTemplate::verb("spring").with_tail(" off the wall")
}
