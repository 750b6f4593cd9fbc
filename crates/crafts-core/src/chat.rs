use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::model::{ChatMessage, Sender};

/// Topic matched by the keyword responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Delivery,
    Returns,
    Products,
    Payment,
    Discount,
    Custom,
    Fallback,
}

struct Rule {
    topic: Topic,
    keywords: &'static [&'static str],
    response: &'static str,
}

/// Scanned top to bottom; the first rule with any keyword in the input wins.
const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Greeting,
        keywords: &["hello", "hi", "hey"],
        response: "Hello! Welcome to CuratedCrafts. How can I help you today?",
    },
    Rule {
        topic: Topic::Delivery,
        keywords: &["delivery", "shipping", "ship"],
        response: "We offer worldwide shipping. Standard delivery takes 5-7 business days, \
                   while express delivery takes 2-3 business days. Shipping costs are \
                   calculated at checkout based on your location.",
    },
    Rule {
        topic: Topic::Returns,
        keywords: &["return", "refund"],
        response: "We have a 30-day return policy. If you're not satisfied with your \
                   purchase, you can return it in its original condition for a full refund \
                   or store credit.",
    },
    Rule {
        topic: Topic::Products,
        keywords: &["product", "item", "sell"],
        response: "We offer a curated selection of handmade crafts, vintage items, jewelry, \
                   home decor, and unique gifts from artisans around the world.",
    },
    Rule {
        topic: Topic::Payment,
        keywords: &["payment", "pay", "card"],
        response: "We accept all major credit cards, PayPal, and Apple Pay for secure and \
                   convenient payments.",
    },
    Rule {
        topic: Topic::Discount,
        keywords: &["discount", "coupon", "offer"],
        response: "Sign up for our newsletter to receive a 10% discount on your first \
                   purchase. We also run seasonal promotions and special offers for our \
                   members.",
    },
    Rule {
        topic: Topic::Custom,
        keywords: &["custom", "personalize"],
        response: "Many of our artisans accept custom orders. You can request a custom piece \
                   through the product page or by contacting our customer service team.",
    },
];

pub const FALLBACK_RESPONSE: &str = "I'm sorry, I couldn't understand your question. Could \
                                     you please rephrase or ask about shipping, returns, \
                                     products, payment methods, or discounts?";

/// The greeting text, also used as the transcript's opening message.
pub fn greeting() -> &'static str {
    RULES[0].response
}

fn matching_rule(text: &str) -> Option<&'static Rule> {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
}

/// Which topic `text` falls under. Substring match, so "this" counts as "hi".
pub fn classify(text: &str) -> Topic {
    matching_rule(text).map_or(Topic::Fallback, |rule| rule.topic)
}

/// Canned answer for `text`. Depends only on this input, never on history.
pub fn respond(text: &str) -> &'static str {
    matching_rule(text).map_or(FALLBACK_RESPONSE, |rule| rule.response)
}

/// Outcome of [`Chat::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// The user message was appended; a reply is queued.
    Accepted { message_id: u64 },
    /// Blank input; nothing was appended.
    Rejected,
}

#[derive(Debug, Clone)]
struct PendingReply {
    due: Instant,
    text: &'static str,
}

/// Append-only chat transcript with deferred bot replies.
///
/// Replies are queued at submit time and appended by [`Chat::poll`] in FIFO
/// order, so a reply always lands after the user message that triggered it
/// and after any earlier reply, whatever the tick timing.
#[derive(Debug, Clone)]
pub struct Chat {
    messages: Vec<ChatMessage>,
    pending: VecDeque<PendingReply>,
    next_id: u64,
    typing_delay: Duration,
}

impl Chat {
    pub fn new(typing_delay: Duration) -> Self {
        let mut chat = Self {
            messages: Vec::new(),
            pending: VecDeque::new(),
            next_id: 1,
            typing_delay,
        };
        chat.push(Sender::Bot, greeting());
        chat
    }

    /// Append the user's message now and queue the bot's answer for
    /// `now + typing_delay`. Whitespace-only input is rejected.
    pub fn submit(&mut self, text: &str, now: Instant) -> Submit {
        if text.trim().is_empty() {
            return Submit::Rejected;
        }
        let message_id = self.push(Sender::User, text);
        self.pending.push_back(PendingReply {
            due: now + self.typing_delay,
            text: respond(text),
        });
        tracing::debug!(message_id, "chat: reply queued");
        Submit::Accepted { message_id }
    }

    /// Append every queued reply whose due time has passed. Returns how many
    /// were appended.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while self.pending.front().is_some_and(|r| r.due <= now) {
            if let Some(reply) = self.pending.pop_front() {
                self.push(Sender::Bot, reply.text);
                delivered += 1;
            }
        }
        delivered
    }

    /// Deadline of the oldest queued reply, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|r| r.due)
    }

    /// `true` while a reply is queued (the "typing" indicator).
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    fn push(&mut self, sender: Sender, text: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage::new(id, sender, text));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_wins_over_shipping() {
        let text = "Hi there, what are your shipping options?";
        assert_eq!(classify(text), Topic::Greeting);
        assert_eq!(respond(text), greeting());
    }

    #[test]
    fn test_gibberish_falls_back() {
        assert_eq!(classify("asdkfjh"), Topic::Fallback);
        assert_eq!(respond("asdkfjh"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_each_topic() {
        let cases = [
            ("HEY", Topic::Greeting),
            ("When will my delivery arrive?", Topic::Delivery),
            ("I want a refund", Topic::Returns),
            ("What do you sell?", Topic::Products),
            ("Do you take PayPal or a card", Topic::Payment),
            ("any coupon codes", Topic::Discount),
            ("can I personalize a mug", Topic::Custom),
        ];
        for (input, topic) in cases {
            assert_eq!(classify(input), topic, "input: {input}");
        }
    }

    #[test]
    fn test_precedence_follows_table_order() {
        // "return" and "payment" both present: returns is listed first.
        assert_eq!(classify("return after payment"), Topic::Returns);
        // "delivery" and "offer": delivery is listed first.
        assert_eq!(classify("express delivery offer"), Topic::Delivery);
        // "shipping" contains "hi", so it is always a greeting.
        assert_eq!(classify("shipping"), Topic::Greeting);
    }

    #[test]
    fn test_substring_matching_is_literal() {
        // "this" contains "hi"; the classifier does no word splitting.
        assert_eq!(classify("what is this"), Topic::Greeting);
    }

    #[test]
    fn test_transcript_starts_with_greeting() {
        let chat = Chat::new(Duration::from_millis(600));
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].id, 1);
        assert!(chat.messages()[0].is_from_bot());
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_blank_input_rejected() {
        let mut chat = Chat::new(Duration::from_millis(600));
        let now = Instant::now();
        assert_eq!(chat.submit("   \t", now), Submit::Rejected);
        assert_eq!(chat.submit("", now), Submit::Rejected);
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_reply_waits_for_delay() {
        let delay = Duration::from_millis(600);
        let mut chat = Chat::new(delay);
        let t0 = Instant::now();

        assert_eq!(
            chat.submit("refund please", t0),
            Submit::Accepted { message_id: 2 }
        );
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].sender, Sender::User);
        assert!(chat.is_typing());
        assert_eq!(chat.next_due(), Some(t0 + delay));

        assert_eq!(chat.poll(t0 + Duration::from_millis(599)), 0);
        assert_eq!(chat.messages().len(), 2);

        assert_eq!(chat.poll(t0 + delay), 1);
        let reply = &chat.messages()[2];
        assert_eq!(reply.id, 3);
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.text, respond("refund please"));
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_replies_follow_submission_order() {
        let mut chat = Chat::new(Duration::from_millis(600));
        let t0 = Instant::now();
        chat.submit("shipping?", t0);
        chat.submit("coupon?", t0 + Duration::from_millis(10));

        // A late tick delivers both, oldest first.
        assert_eq!(chat.poll(t0 + Duration::from_secs(5)), 2);
        let texts: Vec<(Sender, &str)> = chat
            .messages()
            .iter()
            .map(|m| (m.sender, m.text.as_str()))
            .collect();
        assert_eq!(
            texts[1..],
            [
                (Sender::User, "shipping?"),
                (Sender::User, "coupon?"),
                (Sender::Bot, respond("shipping?")),
                (Sender::Bot, respond("coupon?")),
            ]
        );
    }

    #[test]
    fn test_zero_delay_still_orders_after_user_message() {
        let mut chat = Chat::new(Duration::ZERO);
        let now = Instant::now();
        chat.submit("hello", now);
        chat.poll(now);
        let senders: Vec<Sender> = chat.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut chat = Chat::new(Duration::ZERO);
        let now = Instant::now();
        for text in ["a", "b", "c"] {
            chat.submit(text, now);
        }
        chat.poll(now);
        let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    }
}
