use super::chain::{ChainReply, Worker};
use super::prompts::{chat_system_prompt, focus_system_prompt, parse_breakdown, AssistPrompt};
use super::ChatMessage;
use crate::domain::{Mood, Task};
use uuid::Uuid;

/// What a background reply belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiRequest {
    Chat,
    Assist { task_id: Uuid, breakdown: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendResult {
    Sent,
    Blank,
    Busy,
}

/// Free-form chat. History holds user and assistant turns only.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    pending: bool,
    using_fallback: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    /// `[system prompt for mood, history...]`, after the new user turn was pushed
    fn request(&self, mood: Mood) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(chat_system_prompt(mood)));
        messages.extend(self.history.iter().cloned());
        messages
    }

    pub fn send(&mut self, input: &str, mood: Mood, worker: &Worker<AiRequest>) -> SendResult {
        let text = input.trim();
        if text.is_empty() {
            return SendResult::Blank;
        }
        if self.pending {
            return SendResult::Busy;
        }
        self.history.push(ChatMessage::user(text));
        self.pending = true;
        self.using_fallback = false;
        worker.submit(AiRequest::Chat, self.request(mood));
        SendResult::Sent
    }

    pub fn receive(&mut self, reply: ChainReply) {
        self.using_fallback = reply.using_fallback();
        self.history.push(ChatMessage::assistant(reply.content));
        self.pending = false;
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.using_fallback = false;
    }
}

/// Focus-mode assistant for a single task
#[derive(Debug, Default)]
pub struct AssistPanel {
    pending: bool,
    task_id: Option<Uuid>,
    response: Option<String>,
    suggestions: Vec<String>,
    using_fallback: bool,
}

impl AssistPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    pub fn ask(
        &mut self,
        task: &Task,
        prompt: AssistPrompt,
        mood: Mood,
        worker: &Worker<AiRequest>,
    ) -> SendResult {
        let user = prompt.user_message(&task.text, mood);
        if user.is_empty() {
            return SendResult::Blank;
        }
        if self.pending {
            return SendResult::Busy;
        }
        self.pending = true;
        self.task_id = Some(task.id);
        self.response = None;
        self.suggestions.clear();
        let messages = vec![
            ChatMessage::system(focus_system_prompt(&task.text, mood)),
            ChatMessage::user(user),
        ];
        let breakdown = prompt == AssistPrompt::Breakdown;
        worker.submit(
            AiRequest::Assist {
                task_id: task.id,
                breakdown,
            },
            messages,
        );
        SendResult::Sent
    }

    /// Store a reply. Replies for a task that is no longer shown are dropped.
    pub fn receive(&mut self, task_id: Uuid, breakdown: bool, reply: ChainReply) -> usize {
        if self.task_id != Some(task_id) {
            return 0;
        }
        self.pending = false;
        self.using_fallback = reply.using_fallback();
        if breakdown {
            self.suggestions = parse_breakdown(&reply.content);
        }
        self.response = Some(reply.content);
        self.suggestions.len()
    }

    /// Hand the suggested sub-tasks to the caller, leaving none behind
    pub fn take_suggestions(&mut self) -> Vec<String> {
        std::mem::take(&mut self.suggestions)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
