use super::{AiError, ChatBackend, ChatMessage, Endpoint};
use crate::config::AiConfig;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub const EMPTY_REPLY: &str =
    "I'm sorry, I couldn't process your request at this time. Please try again later.";
pub const OFFLINE_REPLY: &str =
    "I'm having trouble connecting to my knowledge base. Please try again in a moment.";

/// Messages kept for the last-resort request
const LAST_RESORT_CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Primary,
    Secondary,
    LastResort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReply {
    pub content: String,
    pub source: ReplySource,
}

impl ChainReply {
    pub fn using_fallback(&self) -> bool {
        self.source != ReplySource::Primary
    }
}

/// Primary, then secondary, then a trimmed-down last resort that never fails
pub struct FallbackChain {
    backend: Arc<dyn ChatBackend>,
    primary: Endpoint,
    secondary: Endpoint,
    last_resort: Endpoint,
}

impl FallbackChain {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        primary: Endpoint,
        secondary: Endpoint,
        last_resort: Endpoint,
    ) -> Self {
        Self {
            backend,
            primary,
            secondary,
            last_resort,
        }
    }

    pub fn from_config(config: &AiConfig, backend: Arc<dyn ChatBackend>) -> Self {
        let fallback_key = config.effective_fallback_key();
        Self::new(
            backend,
            Endpoint {
                model: config.primary_model.clone(),
                api_key: config.api_key.clone(),
                temperature: 0.7,
                max_tokens: 1000,
            },
            Endpoint {
                model: config.secondary_model.clone(),
                api_key: fallback_key.clone(),
                temperature: 0.7,
                max_tokens: 1000,
            },
            Endpoint {
                model: config.last_resort_model.clone(),
                api_key: fallback_key,
                temperature: 0.5,
                max_tokens: 500,
            },
        )
    }

    pub fn run(&self, messages: &[ChatMessage]) -> ChainReply {
        match self.backend.complete(&self.primary, messages) {
            Ok(content) => {
                return ChainReply {
                    content,
                    source: ReplySource::Primary,
                }
            }
            Err(e) => warn!(model = %self.primary.model, error = %e, "primary model failed, trying fallback"),
        }

        match self.backend.complete(&self.secondary, messages) {
            Ok(content) => {
                return ChainReply {
                    content,
                    source: ReplySource::Secondary,
                }
            }
            Err(e) => warn!(model = %self.secondary.model, error = %e, "fallback model failed, trying last resort"),
        }

        let tail = &messages[messages.len().saturating_sub(LAST_RESORT_CONTEXT)..];
        let content = match self.backend.complete(&self.last_resort, tail) {
            Ok(content) => content,
            Err(AiError::EmptyResponse) => {
                warn!(model = %self.last_resort.model, "last resort returned no content");
                EMPTY_REPLY.to_string()
            }
            Err(e) => {
                warn!(model = %self.last_resort.model, error = %e, "last resort failed");
                OFFLINE_REPLY.to_string()
            }
        };
        ChainReply {
            content,
            source: ReplySource::LastResort,
        }
    }
}

/// Runs chain requests off the UI thread; replies are tagged and polled
pub struct Worker<T> {
    chain: Arc<FallbackChain>,
    tx: Sender<(T, ChainReply)>,
    rx: Receiver<(T, ChainReply)>,
}

impl<T: Send + 'static> Worker<T> {
    pub fn new(chain: Arc<FallbackChain>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { chain, tx, rx }
    }

    pub fn submit(&self, tag: T, messages: Vec<ChatMessage>) {
        let chain = Arc::clone(&self.chain);
        let tx = self.tx.clone();
        info!(messages = messages.len(), "submitting chat request");
        thread::spawn(move || {
            let reply = chain.run(&messages);
            // Receiver gone means the app is shutting down
            let _ = tx.send((tag, reply));
        });
    }

    /// Non-blocking; called every tick
    pub fn poll(&self) -> Option<(T, ChainReply)> {
        self.rx.try_recv().ok()
    }

    pub fn wait(&self, timeout: Duration) -> Option<(T, ChainReply)> {
        self.rx.recv_timeout(timeout).ok()
    }
}
