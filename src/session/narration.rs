//! Narration grammar and the message log
//!
//! Sentences are composed from a verb template plus subject/object
//! references: "You hit the ninja.", "The ninja misses you.", "You spring
//! off the wall." Composed messages accumulate in a pending buffer that
//! wraps into log lines under a fixed character budget.

use crate::combat::messages::MessageTemplate;

/// How an entity reads in a sentence
#[derive(Debug, Clone, Copy)]
pub struct Speaker<'a> {
    pub name: &'a str,
    /// Proper names drop the article
    pub proper_name: bool,
    /// Plural names take the plural verb form
    pub plural: bool,
    pub is_player: bool,
}

/// Compose one sentence: subject + verb + mid-fragment + optional object
/// clause + tail-fragment + ".".
pub fn compose(template: &MessageTemplate, subject: &Speaker, object: Option<&Speaker>) -> String {
    let mut sentence = String::new();

    if subject.is_player {
        sentence.push_str("You ");
        sentence.push_str(&template.second);
    } else {
        if !subject.proper_name {
            sentence.push_str("The ");
        }
        sentence.push_str(subject.name);
        sentence.push(' ');
        sentence.push_str(if subject.plural {
            &template.third_plural
        } else {
            &template.third_singular
        });
    }

    sentence.push_str(&template.mid);

    if let Some(object) = object {
        sentence.push(' ');
        if object.is_player {
            sentence.push_str("you");
        } else {
            if !object.proper_name {
                sentence.push_str("the ");
            }
            sentence.push_str(object.name);
        }
    }

    sentence.push_str(&template.tail);
    sentence.push('.');
    sentence
}

/// Group repeated names with count pluralization and join into a list:
/// "a banana", "a banana and a lute", "a banana, a lute and 2 ninjas".
///
/// First-appearance order is preserved. Callers guard against an empty
/// slice.
pub fn name_list(names: &[String]) -> String {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for name in names {
        match groups.iter_mut().find(|(n, _)| *n == name.as_str()) {
            Some((_, count)) => *count += 1,
            None => groups.push((name, 1)),
        }
    }

    let pieces: Vec<String> = groups
        .iter()
        .map(|(name, count)| {
            if *count == 1 {
                format!("a {name}")
            } else {
                format!("{count} {name}s")
            }
        })
        .collect();

    match pieces.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    }
}

/// Line-wrapped message log
///
/// Messages append to a pending line; the line flushes once the next
/// message would push it past the character budget. The display shows only
/// a trailing window of lines.
#[derive(Debug)]
pub struct MessageLog {
    lines: Vec<String>,
    pending: String,
    budget: usize,
}

impl MessageLog {
    pub fn new(budget: usize) -> Self {
        Self {
            lines: Vec::new(),
            pending: String::new(),
            budget,
        }
    }

    /// Append one message to the pending line, wrapping first if it would
    /// overflow the budget.
    pub fn append(&mut self, message: &str) {
        if !self.pending.is_empty() && self.pending.len() + 1 + message.len() > self.budget {
            self.flush();
        }
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(message);
    }

    /// Promote the pending buffer to a finished line.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.lines.push(std::mem::take(&mut self.pending));
        }
    }

    /// Push a complete line directly, bypassing the pending buffer.
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The most recent `n` finished lines.
    pub fn recent(&self, n: usize) -> &[String] {
        &self.lines[self.lines.len().saturating_sub(n)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::messages;

    fn player() -> Speaker<'static> {
        Speaker {
            name: "you",
            proper_name: false,
            plural: false,
            is_player: true,
        }
    }

    fn ninja() -> Speaker<'static> {
        Speaker {
            name: "ninja",
            proper_name: false,
            plural: false,
            is_player: false,
        }
    }

    #[test]
    fn test_player_subject_uses_second_person() {
        let msg = compose(&messages::hit(), &player(), Some(&ninja()));
        assert_eq!(msg, "You hit the ninja.");
    }

    #[test]
    fn test_npc_subject_uses_third_person() {
        let msg = compose(&messages::hit(), &ninja(), Some(&player()));
        assert_eq!(msg, "The ninja hits you.");
    }

    #[test]
    fn test_proper_name_drops_article() {
        let boss = Speaker {
            name: "Kenshiro",
            proper_name: true,
            plural: false,
            is_player: false,
        };
        assert_eq!(
            compose(&messages::miss(), &boss, Some(&player())),
            "Kenshiro misses you."
        );
        assert_eq!(
            compose(&messages::hit(), &player(), Some(&boss)),
            "You hit Kenshiro."
        );
    }

    #[test]
    fn test_plural_subject_uses_plural_verb() {
        let rats = Speaker {
            name: "rats",
            proper_name: false,
            plural: true,
            is_player: false,
        };
        assert_eq!(
            compose(&messages::miss(), &rats, Some(&player())),
            "The rats miss you."
        );
    }

    #[test]
    fn test_fragments_wrap_the_object() {
        assert_eq!(
            compose(&messages::lunge(), &player(), Some(&ninja())),
            "You lunge at the ninja."
        );
        assert_eq!(compose(&messages::spring(), &player(), None), "You spring off the wall.");
    }

    #[test]
    fn test_name_list_grouping() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(name_list(&names(&["banana"])), "a banana");
        assert_eq!(name_list(&names(&["banana", "lute"])), "a banana and a lute");
        assert_eq!(name_list(&names(&["ninja", "ninja"])), "2 ninjas");
        assert_eq!(
            name_list(&names(&["banana", "ninja", "lute", "ninja"])),
            "a banana, 2 ninjas and a lute"
        );
    }

    #[test]
    fn test_log_wraps_at_budget() {
        let mut log = MessageLog::new(20);
        log.append("twelve chars");
        log.append("over the line");
        log.flush();
        assert_eq!(log.lines(), ["twelve chars", "over the line"]);
    }

    #[test]
    fn test_log_joins_short_messages() {
        let mut log = MessageLog::new(40);
        log.append("You hit.");
        log.append("The ninja dies.");
        log.flush();
        assert_eq!(log.lines(), ["You hit. The ninja dies."]);
    }

    #[test]
    fn test_recent_window() {
        let mut log = MessageLog::new(80);
        for i in 0..8 {
            log.push_line(&format!("line {i}"));
        }
        assert_eq!(log.recent(5), ["line 3", "line 4", "line 5", "line 6", "line 7"]);
        assert_eq!(log.recent(20).len(), 8);
    }
}
