//! Chat transcript: an append-only, role-tagged log of the conversation.

use colored::*;

/// Who authored a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    System,
}

impl Role {
    pub fn tag(&self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Bot => "stylist",
            Role::System => "system",
        }
    }
}

/// One immutable transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub text: String,
    pub role: Role,
}

/// The scrolling chat log.
///
/// Entries are chronological and never reordered, capped, or mutated after
/// creation. Each append prints immediately, so the newest line is always
/// the last thing on screen, the terminal analog of scroll-to-bottom.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { entries: Vec::new() }
    }

    /// Append one line and echo it to the terminal.
    pub fn append(&mut self, text: &str, role: Role) {
        let entry = ChatEntry { text: text.to_string(), role };
        print_entry(&entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently appended entry, if any.
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }
}

fn print_entry(entry: &ChatEntry) {
    match entry.role {
        Role::User => println!("{} {}", "you ▸".bright_cyan().bold(), entry.text),
        Role::Bot => println!("{} {}", "stylist ▸".bright_green().bold(), entry.text),
        Role::System => println!("{}", entry.text.bright_yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(t.last().is_none());
    }

    #[test]
    fn test_append_adds_entry_with_role() {
        let mut t = Transcript::new();
        t.append("hello", Role::User);
        assert_eq!(t.len(), 1);
        assert_eq!(t.entries()[0].text, "hello");
        assert_eq!(t.entries()[0].role, Role::User);
    }

    #[test]
    fn test_append_is_chronological() {
        let mut t = Transcript::new();
        t.append("first", Role::User);
        t.append("second", Role::Bot);
        t.append("third", Role::System);
        let roles: Vec<Role> = t.entries().iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Bot, Role::System]);
        assert_eq!(t.last().map(|e| e.text.as_str()), Some("third"));
    }

    #[test]
    fn test_append_never_merges_duplicate_lines() {
        let mut t = Transcript::new();
        t.append("same", Role::Bot);
        t.append("same", Role::Bot);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_transcript_grows_without_cap() {
        let mut t = Transcript::new();
        for i in 0..500 {
            t.append(&format!("line {}", i), Role::Bot);
        }
        assert_eq!(t.len(), 500);
        assert_eq!(t.entries()[499].text, "line 499");
    }

    #[test]
    fn test_role_tags() {
        assert_eq!(Role::User.tag(), "you");
        assert_eq!(Role::Bot.tag(), "stylist");
        assert_eq!(Role::System.tag(), "system");
    }
}
