//! Scripted assistant chat. Every user message schedules one canned reply
//! after a fixed delay.
//!
//! Replies are independent timers keyed by the message that triggered them:
//! sending again does not cancel earlier ones, and replies land in the order
//! their timers fire. Dropping the screen cancels whatever is still pending.

use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Local};
use shared::domain::ChatMessageId;
use thiserror::Error;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};
use tracing::{debug, trace};

pub const GREETING: &str =
    "Olá! Sou o assistente virtual do restaurante. Como posso ajudá-lo hoje?";
pub const SCRIPTED_REPLY: &str =
    "Entendi! Vou processar seu pedido. Gostaria de adicionar algo mais?";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub text: String,
    pub from_user: bool,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, from_user: bool) -> Self {
        Self {
            id: ChatMessageId::generate(),
            text: text.into(),
            from_user,
            sent_at: Local::now(),
        }
    }

    /// `HH:MM` shown under the bubble.
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat replies need a running tokio runtime")]
    NoRuntime,
}

pub struct ChatScreen {
    messages: Vec<ChatMessage>,
    draft: String,
    reply_delay: Duration,
    pending: HashMap<ChatMessageId, JoinHandle<()>>,
    reply_tx: mpsc::UnboundedSender<ChatMessageId>,
    reply_rx: mpsc::UnboundedReceiver<ChatMessageId>,
}

impl Default for ChatScreen {
    fn default() -> Self {
        Self::with_reply_delay(DEFAULT_REPLY_DELAY)
    }
}

impl ChatScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply_delay(reply_delay: Duration) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            messages: vec![ChatMessage::new(GREETING, false)],
            draft: String::new(),
            reply_delay,
            pending: HashMap::new(),
            reply_tx,
            reply_rx,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Applies to messages sent from now on.
    pub fn set_reply_delay(&mut self, reply_delay: Duration) {
        self.reply_delay = reply_delay;
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Appends the draft as a user message and schedules the reply. A blank
    /// draft sends nothing and yields `Ok(None)`.
    pub fn send_message(&mut self) -> Result<Option<ChatMessageId>, ChatError> {
        if self.draft.trim().is_empty() {
            return Ok(None);
        }
        let runtime = Handle::try_current().map_err(|_| ChatError::NoRuntime)?;

        let message = ChatMessage::new(std::mem::take(&mut self.draft), true);
        let id = message.id.clone();
        self.messages.push(message);

        let tx = self.reply_tx.clone();
        let delay = self.reply_delay;
        let reply_for = id.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // the screen may already be gone
            let _ = tx.send(reply_for);
        });
        self.pending.insert(id.clone(), handle);
        debug!(message_id = %id, delay_ms = delay.as_millis() as u64, "chat: reply scheduled");
        Ok(Some(id))
    }

    /// Cancels the reply scheduled for `message_id`. Returns whether one was
    /// still pending.
    pub fn cancel_reply(&mut self, message_id: &ChatMessageId) -> bool {
        match self.pending.remove(message_id) {
            Some(handle) => {
                handle.abort();
                debug!(%message_id, "chat: reply cancelled");
                true
            }
            None => false,
        }
    }

    /// Waits for the next reply and appends it. `None` once nothing is
    /// pending.
    pub async fn next_reply(&mut self) -> Option<&ChatMessage> {
        loop {
            let fired = match self.reply_rx.try_recv() {
                Ok(id) => id,
                Err(_) if self.pending.is_empty() => return None,
                Err(_) => self.reply_rx.recv().await?,
            };
            if self.accept_reply(fired) {
                return self.messages.last();
            }
        }
    }

    /// Appends every reply whose timer already fired, without waiting.
    pub fn drain_ready_replies(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(fired) = self.reply_rx.try_recv() {
            if self.accept_reply(fired) {
                appended += 1;
            }
        }
        appended
    }

    fn accept_reply(&mut self, fired: ChatMessageId) -> bool {
        // cancelled after the timer fired but before delivery
        if self.pending.remove(&fired).is_none() {
            trace!(message_id = %fired, "chat: dropping cancelled reply");
            return false;
        }
        let reply = ChatMessage::new(SCRIPTED_REPLY, false);
        debug!(message_id = %fired, reply_id = %reply.id, "chat: reply delivered");
        self.messages.push(reply);
        true
    }
}

impl Drop for ChatScreen {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
