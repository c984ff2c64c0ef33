// src/conversation.rs

use chrono::{DateTime, Local};
use std::collections::{HashMap, VecDeque};

/// Submission token. Allocated per submission in monotonically
/// increasing order; replies are re-sequenced against it.
pub type Seq = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single rendered-to-be message. Text is stored raw; sanitisation
/// happens in the view projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    fn new(sender: Sender, text: String) -> Self {
        Self {
            sender,
            text,
            timestamp: Local::now(),
        }
    }
}

/// Outcome of one submission, as the view should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotReply {
    /// The service answered; render the text as a bot bubble.
    Answer(String),
    /// Something went wrong (service-reported or transport); render
    /// the description with an `Error: ` prefix.
    Failure(String),
    /// The service said nothing renderable. No bubble.
    Silent,
}

/// Append-only conversation, decoupled from rendering.
///
/// Replies may settle in any order, but bubbles are appended in submit
/// order: a reply is held until every earlier submission has settled.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    next_seq: Seq,
    pending: VecDeque<Seq>,
    held: HashMap<Seq, BotReply>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits user text. Whitespace-only input is a no-op and
    /// allocates nothing; otherwise the trimmed text is appended as a
    /// user message and the submission token is returned.
    pub fn submit(&mut self, raw: &str) -> Option<Seq> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(Message::new(Sender::User, text.to_string()));

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push_back(seq);
        Some(seq)
    }

    /// Records the outcome of a submission. Returns true if any bubble
    /// was appended. Unknown or already-settled tokens are ignored.
    pub fn settle(&mut self, seq: Seq, reply: BotReply) -> bool {
        if !self.pending.contains(&seq) || self.held.contains_key(&seq) {
            return false;
        }
        self.held.insert(seq, reply);

        let mut appended = false;
        while let Some(&front) = self.pending.front() {
            let Some(reply) = self.held.remove(&front) else {
                break;
            };
            self.pending.pop_front();
            match reply {
                BotReply::Answer(text) => {
                    self.messages.push(Message::new(Sender::Bot, text));
                    appended = true;
                }
                BotReply::Failure(text) => {
                    self.messages
                        .push(Message::new(Sender::Bot, format!("Error: {}", text)));
                    appended = true;
                }
                BotReply::Silent => {}
            }
        }
        appended
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Submissions still waiting on the network.
    pub fn in_flight(&self) -> usize {
        self.pending.len() - self.held.len()
    }
}
