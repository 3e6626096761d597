//! Player-facing notifications
//!
//! Fire-and-forget sink for short messages ("JUMP!", "Level 2/7"). The game
//! never waits on or inspects what the sink does with them.

/// Receives short status messages
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Forwards messages to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// Keeps every message in order; handy for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub messages: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }
}
