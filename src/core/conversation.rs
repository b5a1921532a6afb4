//! In-memory conversation owned by one chat session.

use crate::core::message::{Message, MessageId, MessageIdGenerator, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendRejected {
    /// The input was empty or whitespace only.
    EmptyInput,
    /// A reply is still streaming into the conversation.
    RequestInFlight,
}

/// Ids of the messages created by a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    pub user_id: MessageId,
    pub assistant_id: MessageId,
}

#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    ids: MessageIdGenerator,
    in_flight: Option<MessageId>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&MessageId> {
        self.in_flight.as_ref()
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|msg| &msg.id == id)
    }

    /// Append the user message and an empty assistant placeholder.
    ///
    /// The placeholder becomes the single in-flight target until
    /// [`Conversation::finish`] is called.
    pub fn begin_exchange(&mut self, text: &str) -> Result<PendingExchange, SendRejected> {
        if text.trim().is_empty() {
            return Err(SendRejected::EmptyInput);
        }
        if self.is_busy() {
            return Err(SendRejected::RequestInFlight);
        }

        let user_id = self.ids.next_id();
        self.messages
            .push(Message::new(user_id.clone(), Role::User, text));

        let assistant_id = self.ids.next_id();
        self.messages
            .push(Message::new(assistant_id.clone(), Role::Assistant, ""));
        self.in_flight = Some(assistant_id.clone());

        Ok(PendingExchange {
            user_id,
            assistant_id,
        })
    }

    /// Replace the content of a message. Returns false when the id is unknown.
    pub fn set_content(&mut self, id: &MessageId, content: impl Into<String>) -> bool {
        match self.messages.iter_mut().find(|msg| &msg.id == id) {
            Some(msg) => {
                msg.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Release the in-flight placeholder so the next send is accepted.
    pub fn finish(&mut self) {
        self.in_flight = None;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.in_flight = None;
    }

    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|msg| msg.is_assistant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_exchange_appends_user_then_placeholder() {
        let mut conversation = Conversation::new();
        let pending = conversation.begin_exchange("hello").unwrap();

        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].content.is_empty());
        assert_ne!(pending.user_id, pending.assistant_id);
        assert_eq!(conversation.in_flight(), Some(&pending.assistant_id));
    }

    #[test]
    fn second_send_is_refused_while_in_flight() {
        let mut conversation = Conversation::new();
        conversation.begin_exchange("one").unwrap();

        assert_eq!(
            conversation.begin_exchange("two"),
            Err(SendRejected::RequestInFlight)
        );
        assert_eq!(conversation.len(), 2);

        conversation.finish();
        assert!(conversation.begin_exchange("two").is_ok());
        assert_eq!(conversation.len(), 4);
    }

    #[test]
    fn whitespace_input_is_refused() {
        let mut conversation = Conversation::new();
        assert_eq!(
            conversation.begin_exchange("  \n\t"),
            Err(SendRejected::EmptyInput)
        );
        assert!(conversation.is_empty());
    }

    #[test]
    fn set_content_replaces_rather_than_appends() {
        let mut conversation = Conversation::new();
        let pending = conversation.begin_exchange("q").unwrap();

        assert!(conversation.set_content(&pending.assistant_id, "Hel"));
        assert!(conversation.set_content(&pending.assistant_id, "Hello"));
        assert_eq!(
            conversation.get(&pending.assistant_id).unwrap().content,
            "Hello"
        );
    }

    #[test]
    fn clear_drops_messages_and_in_flight_marker() {
        let mut conversation = Conversation::new();
        let pending = conversation.begin_exchange("q").unwrap();
        conversation.clear();

        assert!(conversation.is_empty());
        assert!(!conversation.is_busy());
        assert!(!conversation.set_content(&pending.assistant_id, "late"));
    }
}
