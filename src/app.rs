use crate::conversation::{BotReply, Conversation, Seq};
use crate::status_indicator::StatusIndicator;

/// Application state: the conversation model, the input buffer, and
/// view bookkeeping. Rendering lives in `chat_view`.
pub struct App {
    pub conversation: Conversation,
    pub input: String,
    pub scroll: u16,
    pub follow: bool,
    pub status: StatusIndicator,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            conversation: Conversation::new(),
            input: String::new(),
            scroll: 0,
            follow: true,
            status: StatusIndicator::new(),
            should_quit: false,
        }
    }

    /// Submits the current input. On success the user bubble is already
    /// in the conversation, the input is cleared, and the caller gets
    /// the token plus the question to dispatch. Whitespace-only input
    /// changes nothing, including the input field.
    pub fn submit(&mut self) -> Option<(Seq, String)> {
        let seq = self.conversation.submit(&self.input)?;
        let question = self.input.trim().to_string();
        self.input.clear();
        self.follow = true;
        self.status.set_waiting(true);
        Some((seq, question))
    }

    /// Applies a finished request. Any new bubble re-pins the view to
    /// the newest message.
    pub fn settle(&mut self, seq: Seq, reply: BotReply) {
        if self.conversation.settle(seq, reply) {
            self.follow = true;
        }
        self.status
            .set_waiting(self.conversation.in_flight() > 0);
    }

    pub fn scroll_up(&mut self) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.follow = false;
        self.scroll = self.scroll.saturating_add(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
