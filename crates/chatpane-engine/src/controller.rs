//! Send controller.
//!
//! Sending is split in two so several sends can overlap on one UI thread:
//! [`ChatController::submit`] does the synchronous part (validate, echo the
//! user message, clear and refocus the input, start the request) and hands
//! back a [`PendingReply`]. The caller renders the reply whenever that
//! handle finishes. [`ChatController::send`] runs both halves back to back.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::message::{Sender, FALLBACK_REPLY, WAITING_REPLY};
use crate::render::render;
use crate::transport::{ChatTransport, TransportError};
use crate::view::{InputField, MessageView};

/// Drives one input field and one message view against a transport.
#[derive(Clone)]
pub struct ChatController {
    transport: Arc<dyn ChatTransport>,
}

impl ChatController {
    /// Create a controller sending through `transport`.
    pub fn new(transport: impl ChatTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Validate the input, echo it, and start the request.
    ///
    /// Returns `None` without touching the input or the view when the
    /// trimmed input is empty. Must be called from within a tokio runtime.
    pub fn submit<I, V>(&self, input: &mut I, view: &mut V) -> Option<PendingReply>
    where
        I: InputField + ?Sized,
        V: MessageView + ?Sized,
    {
        let message = trim_input(input.value()).to_string();
        if message.is_empty() {
            return None;
        }

        render(view, Sender::User, message.clone());
        input.clear();
        input.focus();

        let transport = Arc::clone(&self.transport);
        let handle = tokio::spawn(async move { transport.send(&message).await });
        Some(PendingReply { handle })
    }

    /// Submit the input and render the reply once it arrives.
    ///
    /// Failures are rendered as the fallback reply; nothing is returned.
    pub async fn send<I, V>(&self, input: &mut I, view: &mut V)
    where
        I: InputField + ?Sized,
        V: MessageView + ?Sized,
    {
        if let Some(pending) = self.submit(input, view) {
            let reply = pending.into_reply().await;
            render(view, Sender::Assistant, reply);
        }
    }
}

/// Trim whitespace and byte order marks from both ends.
fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

impl std::fmt::Debug for ChatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController").finish_non_exhaustive()
    }
}

/// Handle to one request in flight.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<Result<String, TransportError>>,
}

impl PendingReply {
    /// Whether the request has resolved, without waiting.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the request and return the text to render.
    pub async fn into_reply(self) -> String {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(TransportError::from(e)),
        };
        resolve_reply(result)
    }

    /// Stop waiting for the request.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Map a transport outcome to the assistant text shown for it.
pub fn resolve_reply(result: Result<String, TransportError>) -> String {
    match result {
        Ok(reply) => {
            if reply == WAITING_REPLY {
                debug!("server is still working on the request");
            }
            reply
        }
        Err(e) => {
            error!(error = %e, "chat request failed");
            FALLBACK_REPLY.to_string()
        }
    }
}

/// Requests started but not yet rendered.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: Vec<PendingReply>,
}

impl InFlight {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly started request.
    pub fn push(&mut self, pending: PendingReply) {
        self.pending.push(pending);
    }

    /// Number of requests still outstanding.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is outstanding.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Render the replies of every request that has finished.
    ///
    /// Unfinished requests are left in place. Returns how many replies were
    /// rendered.
    pub async fn render_finished<V>(&mut self, view: &mut V) -> usize
    where
        V: MessageView + ?Sized,
    {
        let mut rendered = 0;
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].is_finished() {
                let reply = self.pending.remove(i).into_reply().await;
                render(view, Sender::Assistant, reply);
                rendered += 1;
            } else {
                i += 1;
            }
        }
        rendered
    }

    /// Abort everything outstanding.
    pub fn abort_all(&mut self) {
        for pending in self.pending.drain(..) {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::transport::{ChatResponse, HttpTransport};
    use crate::view::{MessageLog, TextField};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn decode_error() -> TransportError {
        TransportError::Decode(serde_json::from_str::<ChatResponse>("not json").unwrap_err())
    }

    /// Replies with a fixed outcome and counts calls.
    struct ScriptedTransport {
        reply: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedTransport {
        fn replying(reply: &str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let transport = Self {
                reply: Some(reply.to_string()),
                calls: Arc::clone(&calls),
            };
            (transport, calls)
        }

        fn failing() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let transport = Self {
                reply: None,
                calls: Arc::clone(&calls),
            };
            (transport, calls)
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn send(&self, _message: &str) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or_else(decode_error)
        }
    }

    /// Holds each reply until the test releases it.
    struct GatedTransport {
        gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
    }

    impl GatedTransport {
        fn new(messages: &[&str]) -> (Self, HashMap<String, oneshot::Sender<String>>) {
            let mut gates = HashMap::new();
            let mut releases = HashMap::new();
            for message in messages {
                let (tx, rx) = oneshot::channel();
                gates.insert((*message).to_string(), rx);
                releases.insert((*message).to_string(), tx);
            }
            let transport = Self {
                gates: Mutex::new(gates),
            };
            (transport, releases)
        }
    }

    #[async_trait]
    impl ChatTransport for GatedTransport {
        async fn send(&self, message: &str) -> Result<String, TransportError> {
            let gate = self.gates.lock().unwrap().remove(message);
            match gate {
                Some(rx) => Ok(rx.await.unwrap_or_default()),
                None => Err(decode_error()),
            }
        }
    }

    struct PanickingTransport;

    #[async_trait]
    impl ChatTransport for PanickingTransport {
        async fn send(&self, _message: &str) -> Result<String, TransportError> {
            panic!("transport blew up");
        }
    }

    async fn render_until(in_flight: &mut InFlight, log: &mut MessageLog, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            let mut rendered = 0;
            while rendered < count {
                rendered += in_flight.render_finished(log).await;
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("replies did not resolve in time");
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let (transport, calls) = ScriptedTransport::replying("unused");
        let controller = ChatController::new(transport);

        for blank in ["", "   ", "\t\n ", "\u{FEFF}", " \u{FEFF}\u{00A0}"] {
            let mut input = TextField::new(blank);
            let mut log = MessageLog::new();

            assert!(controller.submit(&mut input, &mut log).is_none());
            controller.send(&mut input, &mut log).await;

            assert!(log.messages().is_empty());
            assert_eq!(input.value(), blank);
            assert!(!input.is_focused());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_byte_order_marks_are_trimmed() {
        let (transport, _calls) = ScriptedTransport::replying("ok");
        let controller = ChatController::new(transport);
        let mut input = TextField::new("\u{FEFF} Hi \u{FEFF}");
        let mut log = MessageLog::new();

        controller.send(&mut input, &mut log).await;

        assert_eq!(log.messages()[0], Message::user("Hi"));
    }

    #[tokio::test]
    async fn test_user_message_renders_before_reply() {
        let (transport, _releases) = GatedTransport::new(&["Hi"]);
        let controller = ChatController::new(transport);
        let mut input = TextField::new("  Hi  ");
        let mut log = MessageLog::new();

        let pending = controller.submit(&mut input, &mut log).unwrap();

        assert_eq!(log.messages(), &[Message::user("Hi")]);
        assert!(!pending.is_finished());
        assert_eq!(input.value(), "");
        assert!(input.is_focused());
        assert!(log.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_send_renders_reply() {
        let (transport, calls) = ScriptedTransport::replying("Hello!");
        let controller = ChatController::new(transport);
        let mut input = TextField::new("Hi");
        let mut log = MessageLog::new();

        controller.send(&mut input, &mut log).await;

        assert_eq!(
            log.messages(),
            &[Message::user("Hi"), Message::assistant("Hello!")]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(input.value(), "");
        assert!(input.is_focused());
        assert!(log.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_waiting_reply_renders_verbatim() {
        let (transport, calls) = ScriptedTransport::replying(WAITING_REPLY);
        let controller = ChatController::new(transport);
        let mut input = TextField::new("schedule a meeting");
        let mut log = MessageLog::new();

        controller.send(&mut input, &mut log).await;

        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[1], Message::assistant("⏳ Waiting for response..."));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_renders_fallback() {
        let (transport, _calls) = ScriptedTransport::failing();
        let controller = ChatController::new(transport);
        let mut input = TextField::new("Hi");
        let mut log = MessageLog::new();

        controller.send(&mut input, &mut log).await;

        assert_eq!(
            log.messages(),
            &[
                Message::user("Hi"),
                Message::assistant("⚠️ Oops! Something went wrong. Please try again."),
            ]
        );
        assert_eq!(input.value(), "");
        assert!(input.is_focused());
        assert!(log.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_unreachable_server_renders_fallback() {
        let controller = ChatController::new(HttpTransport::new("http://127.0.0.1:9/chat"));
        let mut input = TextField::new("anyone there?");
        let mut log = MessageLog::new();

        controller.send(&mut input, &mut log).await;

        assert_eq!(log.messages()[1], Message::assistant(FALLBACK_REPLY));
    }

    #[tokio::test]
    async fn test_panicking_transport_renders_fallback() {
        let controller = ChatController::new(PanickingTransport);
        let mut input = TextField::new("Hi");
        let mut log = MessageLog::new();

        controller.send(&mut input, &mut log).await;

        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_replies_render_in_resolution_order() {
        let (transport, mut releases) = GatedTransport::new(&["A", "B"]);
        let controller = ChatController::new(transport);
        let mut input = TextField::new("A");
        let mut log = MessageLog::new();
        let mut in_flight = InFlight::new();

        in_flight.push(controller.submit(&mut input, &mut log).unwrap());
        input.set_value("B");
        in_flight.push(controller.submit(&mut input, &mut log).unwrap());
        assert_eq!(in_flight.len(), 2);

        releases.remove("B").unwrap().send("reply B".into()).unwrap();
        render_until(&mut in_flight, &mut log, 1).await;

        releases.remove("A").unwrap().send("reply A".into()).unwrap();
        render_until(&mut in_flight, &mut log, 1).await;

        assert!(in_flight.is_empty());
        assert_eq!(
            log.messages(),
            &[
                Message::user("A"),
                Message::user("B"),
                Message::assistant("reply B"),
                Message::assistant("reply A"),
            ]
        );
    }

    #[tokio::test]
    async fn test_abort_all_drops_outstanding() {
        let (transport, _releases) = GatedTransport::new(&["A"]);
        let controller = ChatController::new(transport);
        let mut input = TextField::new("A");
        let mut log = MessageLog::new();
        let mut in_flight = InFlight::new();

        in_flight.push(controller.submit(&mut input, &mut log).unwrap());
        in_flight.abort_all();

        assert!(in_flight.is_empty());
        assert_eq!(log.messages().len(), 1);
    }

    #[test]
    fn test_resolve_reply() {
        assert_eq!(resolve_reply(Ok("fine".into())), "fine");
        assert_eq!(resolve_reply(Ok(WAITING_REPLY.into())), WAITING_REPLY);
        assert_eq!(resolve_reply(Err(decode_error())), FALLBACK_REPLY);
    }
}
