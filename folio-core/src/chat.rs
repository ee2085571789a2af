//! Scripted chatbot: fixed keyword rules, first match wins

use std::time::Duration;

/// Pause before the bot "types" its answer
pub const REPLY_DELAY: Duration = Duration::from_millis(800);

/// Keywords that trigger a canned reply
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        keywords: &["skill", "technology", "stack"],
        reply: "I am proficient in C, C++, Python, Java, JavaScript, and Web Technologies (HTML/CSS). I also work with Cloud (AWS/Azure) and AI tools.",
    },
    Rule {
        keywords: &["project", "work"],
        reply: "Some of my featured projects are the Particle Gesture System (AI/Computer Vision) and InfoGuardAI (Misinformation Detection). You can see more in the Projects section!",
    },
    Rule {
        keywords: &["contact", "email", "reach"],
        reply: "You can reach me at cjitesh775@gmail.com or connect with me on LinkedIn!",
    },
    Rule {
        keywords: &["hello", "hi"],
        reply: "Hello! How can I help you today?",
    },
    Rule {
        keywords: &["resume", "cv", "download"],
        reply: "You can download my resume using the 'PDF' button in the intro section.",
    },
];

pub const FALLBACK_REPLY: &str =
    "I'm still learning! Please check the About section for more details about my background.";

/// Who a transcript line belongs to; maps to the bubble's CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn css_class(&self) -> &'static str {
        match self {
            Speaker::User => "user-message",
            Speaker::Bot => "bot-message",
        }
    }
}

/// Pick the reply for `input`.
///
/// Matching is a case-insensitive substring test, so "hi" also fires inside
/// "this" or "which" when no earlier rule matched.
pub fn respond(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK_REPLY)
}

/// Trimmed message text, or `None` for blank input that should be ignored
pub fn normalize_input(raw: &str) -> Option<&str> {
    let text = raw.trim();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_fires() {
        assert!(respond("What is your tech STACK?").starts_with("I am proficient"));
        assert!(respond("show me a project").starts_with("Some of my featured"));
        assert!(respond("how to reach you").contains("cjitesh775@gmail.com"));
        assert_eq!(respond("Hello"), "Hello! How can I help you today?");
        assert!(respond("cv please").contains("'PDF' button"));
    }

    #[test]
    fn test_first_rule_wins() {
        // "skills" and "projects" both match; skills is listed first
        assert!(respond("skills and projects").starts_with("I am proficient"));
        // "download" would match resume, but "work" comes earlier
        assert!(respond("download your work").starts_with("Some of my featured"));
    }

    #[test]
    fn test_substring_quirk() {
        assert_eq!(respond("is this real"), "Hello! How can I help you today?");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(respond("favourite colour?"), FALLBACK_REPLY);
        assert_eq!(respond(""), FALLBACK_REPLY);
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  hey \n"), Some("hey"));
        assert_eq!(normalize_input("   "), None);
        assert_eq!(normalize_input(""), None);
    }

    #[test]
    fn test_speaker_classes() {
        assert_eq!(Speaker::User.css_class(), "user-message");
        assert_eq!(Speaker::Bot.css_class(), "bot-message");
    }
}
