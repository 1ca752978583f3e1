//! Tutor chat flow: question in, reply appended, errors swallowed
//!
//! The transcript only ever grows. Every accepted question adds exactly two
//! entries, the question and then either the reply or a fixed fallback.

use std::future::Future;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::TutorError;
use super::models::Role;
use super::prompt::{Prompt, build_prompt};

/// Appended when the backend fails for any reason
pub const FALLBACK_REPLY: &str =
    "Desculpe, estou com dificuldades para processar sua pergunta agora. Verifique sua conexão.";

/// Appended when the backend succeeds with an empty reply
pub const EMPTY_REPLY: &str = "Não entendi sua dúvida.";

/// Greeting shown above an empty transcript
pub const GREETING: &str = "Olá! Sou seu tutor virtual.\nTem alguma dúvida sobre o conteúdo desta aula?";

/// A text-completion backend
pub trait Completion: Send + Sync {
    /// Complete `prompt`, forwarding partial text through `deltas` as it arrives
    fn complete(
        &self,
        prompt: Prompt,
        deltas: mpsc::UnboundedSender<String>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<String, TutorError>> + Send;
}

/// Outcome of one question
#[derive(Debug)]
pub struct Reply {
    /// Text to append to the transcript
    pub text: String,
    /// The swallowed backend error, if any
    pub error: Option<TutorError>,
}

/// Ask the tutor a question about `context`; never fails
pub async fn ask<B: Completion>(
    backend: &B,
    question: &str,
    context: &str,
    context_chars: usize,
    deltas: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
) -> Reply {
    let prompt = build_prompt(question, context, context_chars);
    match backend.complete(prompt, deltas, cancel).await {
        Ok(text) if text.trim().is_empty() => Reply { text: EMPTY_REPLY.to_string(), error: None },
        Ok(text) => Reply { text, error: None },
        Err(err) => {
            tracing::error!(error = %err, "Tutor request failed");
            Reply { text: FALLBACK_REPLY.to_string(), error: Some(err) }
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
}

/// Chat widget state
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: bool,
    /// Text streamed so far for the pending reply
    pub stream_buffer: String,
    /// Current input line
    pub input: String,
    /// Cursor position in `input`, in chars
    pub cursor: usize,
    /// Lines scrolled up from the bottom of the transcript
    pub scroll_from_bottom: usize,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is in flight; sending is disabled meanwhile
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the send action is currently allowed for `input`
    pub fn can_send(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Accept a question; returns it trimmed, or `None` if blank or busy
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let question = input.trim();
        if question.is_empty() || self.pending {
            return None;
        }
        self.push(Role::User, question.to_string());
        self.pending = true;
        self.stream_buffer.clear();
        self.scroll_from_bottom = 0;
        Some(question.to_string())
    }

    /// Submit the input line, clearing it when accepted
    pub fn submit_input(&mut self) -> Option<String> {
        let input = std::mem::take(&mut self.input);
        match self.submit(&input) {
            Some(question) => {
                self.cursor = 0;
                Some(question)
            }
            None => {
                self.input = input;
                None
            }
        }
    }

    /// Live text from the stream
    pub fn append_delta(&mut self, delta: &str) {
        if self.pending {
            self.stream_buffer.push_str(delta);
        }
    }

    /// Append the assistant entry and re-enable sending
    pub fn deliver(&mut self, reply: String) {
        self.push(Role::Assistant, reply);
        self.pending = false;
        self.stream_buffer.clear();
        self.scroll_from_bottom = 0;
    }

    fn push(&mut self, role: Role, text: String) {
        self.messages.push(ChatMessage { id: self.next_id, role, text });
        self.next_id += 1;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.byte_index();
            self.input.remove(byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    fn byte_index(&self) -> usize {
        self.input.char_indices().nth(self.cursor).map_or(self.input.len(), |(i, _)| i)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Backend that replies with a fixed result
    struct Scripted(Result<&'static str, ()>);

    impl Completion for Scripted {
        async fn complete(
            &self,
            prompt: Prompt,
            deltas: mpsc::UnboundedSender<String>,
            _cancel: CancellationToken,
        ) -> Result<String, TutorError> {
            assert!(prompt.user.contains("PERGUNTA DO ALUNO"));
            match self.0 {
                Ok(text) => {
                    let _ = deltas.send(text.to_string());
                    Ok(text.to_string())
                }
                Err(()) => Err(TutorError::StreamError("connection reset".into())),
            }
        }
    }

    async fn round_trip(chat: &mut ChatState, backend: &Scripted, question: &str) {
        let question = chat.submit(question).expect("question accepted");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reply = ask(backend, &question, "# Decoradores", 3000, tx, CancellationToken::new()).await;
        while let Ok(delta) = rx.try_recv() {
            chat.append_delta(&delta);
        }
        chat.deliver(reply.text);
    }

    #[tokio::test]
    async fn successful_question_appends_two_entries() {
        let mut chat = ChatState::new();
        let backend = Scripted(Ok("Um decorador envolve uma função."));
        round_trip(&mut chat, &backend, "what is a decorator").await;

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0].role, Role::User);
        assert_eq!(chat.messages()[0].text, "what is a decorator");
        assert_eq!(chat.messages()[1].role, Role::Assistant);
        assert_eq!(chat.messages()[1].text, "Um decorador envolve uma função.");
        assert!(!chat.is_pending());
    }

    #[tokio::test]
    async fn failure_appends_fallback() {
        let mut chat = ChatState::new();
        round_trip(&mut chat, &Scripted(Err(())), "what is a decorator").await;

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn empty_reply_gets_placeholder_text() {
        let reply = ask(
            &Scripted(Ok("  ")),
            "oi",
            "",
            3000,
            mpsc::unbounded_channel().0,
            CancellationToken::new(),
        )
        .await;
        assert_eq!(reply.text, EMPTY_REPLY);
        assert!(reply.error.is_none());
    }

    #[tokio::test]
    async fn failure_keeps_the_error() {
        let reply = ask(
            &Scripted(Err(())),
            "oi",
            "",
            3000,
            mpsc::unbounded_channel().0,
            CancellationToken::new(),
        )
        .await;
        assert!(matches!(reply.error, Some(TutorError::StreamError(_))));
    }

    #[tokio::test]
    async fn transcript_grows_by_two_per_question() {
        let mut chat = ChatState::new();
        let ok = Scripted(Ok("sim"));
        let err = Scripted(Err(()));
        for (i, backend) in [&ok, &err, &ok].into_iter().enumerate() {
            round_trip(&mut chat, backend, "pergunta").await;
            assert_eq!(chat.messages().len(), 2 * (i + 1));
        }
        let ids: Vec<_> = chat.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn blank_and_busy_submissions_are_rejected() {
        let mut chat = ChatState::new();
        assert_eq!(chat.submit("   "), None);
        assert!(chat.messages().is_empty());

        assert_eq!(chat.submit("  primeira  "), Some("primeira".to_string()));
        assert_eq!(chat.submit("segunda"), None);
        assert_eq!(chat.messages().len(), 1);

        chat.deliver("ok".into());
        assert!(chat.submit("segunda").is_some());
    }

    #[test]
    fn submit_input_clears_only_when_accepted() {
        let mut chat = ChatState::new();
        for c in "olá".chars() {
            chat.insert_char(c);
        }
        assert!(chat.can_send());
        assert_eq!(chat.submit_input(), Some("olá".to_string()));
        assert!(chat.input.is_empty());

        chat.input = "outra".into();
        assert!(!chat.can_send());
        assert_eq!(chat.submit_input(), None);
        assert_eq!(chat.input, "outra");
    }

    #[test]
    fn input_editing_is_char_based() {
        let mut chat = ChatState::new();
        for c in "ação".chars() {
            chat.insert_char(c);
        }
        chat.move_cursor_left();
        chat.delete_char_before();
        assert_eq!(chat.input, "aço");
        chat.move_cursor_right();
        chat.move_cursor_right();
        assert_eq!(chat.cursor, 3);
    }

    #[test]
    fn deltas_only_buffer_while_pending() {
        let mut chat = ChatState::new();
        chat.append_delta("perdido");
        assert!(chat.stream_buffer.is_empty());
        chat.submit("q");
        chat.append_delta("Um ");
        chat.append_delta("texto");
        assert_eq!(chat.stream_buffer, "Um texto");
        chat.deliver("Um texto".into());
        assert!(chat.stream_buffer.is_empty());
    }
}
