//! The listener contract: how decoded events reach application code.
//!
//! A session holds at most one listener. Each decoded inbound frame
//! produces exactly one call, in arrival order, on the session's reader
//! task. Callbacks are synchronous and run on that task, so a slow
//! callback delays every later frame. Hand heavy work off (for example
//! through an [`EventQueue`]).

use std::sync::Arc;

use roomchat_protocol::Event;
use tokio::sync::mpsc;

/// Receives decoded events from a session.
///
/// Implement the four typed callbacks; [`on_event`](Self::on_event)
/// routes each [`Event`] to the matching one. Override `on_event` instead
/// to handle the enum directly.
///
/// The listener is never told about its own session closing. Use
/// [`Session::closed`](crate::Session::closed) for that.
///
/// # Example
///
/// ```rust
/// use roomchat_session::EventListener;
///
/// struct Printer;
///
/// impl EventListener for Printer {
///     fn on_message(&self, from: &str, text: &str) {
///         println!("{from}: {text}");
///     }
///     fn on_image(&self, from: &str, base64: &str) {
///         println!("{from} sent an image ({} bytes of base64)", base64.len());
///     }
///     fn on_join(&self, user: &str) {
///         println!("* {user} joined");
///     }
///     fn on_leave(&self, user: &str) {
///         println!("* {user} left");
///     }
/// }
/// ```
pub trait EventListener: Send + Sync + 'static {
    /// A chat message. Reply and private-message markup is left in `text`.
    fn on_message(&self, from: &str, text: &str);

    /// An image, base64-encoded.
    fn on_image(&self, from: &str, base64: &str);

    /// `user` joined the room.
    fn on_join(&self, user: &str);

    /// `user` left the room.
    fn on_leave(&self, user: &str);

    /// Dispatches one event to the typed callbacks.
    fn on_event(&self, event: &Event) {
        match event {
            Event::Message { from, text } => self.on_message(from, text),
            Event::Image { from, base64 } => self.on_image(from, base64),
            Event::Join { user } => self.on_join(user),
            Event::Leave { user } => self.on_leave(user),
        }
    }
}

impl<L: EventListener + ?Sized> EventListener for Arc<L> {
    fn on_message(&self, from: &str, text: &str) {
        (**self).on_message(from, text);
    }

    fn on_image(&self, from: &str, base64: &str) {
        (**self).on_image(from, base64);
    }

    fn on_join(&self, user: &str) {
        (**self).on_join(user);
    }

    fn on_leave(&self, user: &str) {
        (**self).on_leave(user);
    }

    fn on_event(&self, event: &Event) {
        (**self).on_event(event);
    }
}

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// A listener that forwards every event into a channel.
///
/// For callers who would rather pull events in their own task than run
/// code on the session's reader. The channel is unbounded so the reader
/// never blocks and no event is dropped; ordering is preserved.
///
/// Create one with [`event_queue`].
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: mpsc::UnboundedSender<Event>,
}

/// Creates an [`EventQueue`] listener and the receiver that drains it.
pub fn event_queue() -> (EventQueue, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventQueue { tx }, rx)
}

impl EventQueue {
    fn push(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event queue receiver dropped");
        }
    }
}

impl EventListener for EventQueue {
    fn on_message(&self, from: &str, text: &str) {
        self.push(Event::Message {
            from: from.to_owned(),
            text: text.to_owned(),
        });
    }

    fn on_image(&self, from: &str, base64: &str) {
        self.push(Event::Image {
            from: from.to_owned(),
            base64: base64.to_owned(),
        });
    }

    fn on_join(&self, user: &str) {
        self.push(Event::Join {
            user: user.to_owned(),
        });
    }

    fn on_leave(&self, user: &str) {
        self.push(Event::Leave {
            user: user.to_owned(),
        });
    }

    fn on_event(&self, event: &Event) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl EventListener for Recorder {
        fn on_message(&self, from: &str, text: &str) {
            self.calls.lock().unwrap().push(format!("message {from} {text}"));
        }
        fn on_image(&self, from: &str, base64: &str) {
            self.calls.lock().unwrap().push(format!("image {from} {base64}"));
        }
        fn on_join(&self, user: &str) {
            self.calls.lock().unwrap().push(format!("join {user}"));
        }
        fn on_leave(&self, user: &str) {
            self.calls.lock().unwrap().push(format!("leave {user}"));
        }
    }

    #[test]
    fn test_on_event_routes_each_variant() {
        let rec = Recorder::default();
        rec.on_event(&Event::Message {
            from: "a".into(),
            text: "hi".into(),
        });
        rec.on_event(&Event::Image {
            from: "b".into(),
            base64: "AQID".into(),
        });
        rec.on_event(&Event::Join { user: "c".into() });
        rec.on_event(&Event::Leave { user: "d".into() });

        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec!["message a hi", "image b AQID", "join c", "leave d"]
        );
    }

    #[test]
    fn test_arc_listener_forwards() {
        let rec = Arc::new(Recorder::default());
        let shared: Arc<dyn EventListener> = rec.clone();
        shared.on_event(&Event::Join { user: "c".into() });
        assert_eq!(*rec.calls.lock().unwrap(), vec!["join c"]);
    }

    #[test]
    fn test_event_queue_preserves_order() {
        let (queue, mut rx) = event_queue();
        queue.on_event(&Event::Join { user: "a".into() });
        queue.on_message("a", "one");
        queue.on_event(&Event::Leave { user: "a".into() });

        assert_eq!(rx.try_recv().unwrap(), Event::Join { user: "a".into() });
        assert_eq!(
            rx.try_recv().unwrap(),
            Event::Message {
                from: "a".into(),
                text: "one".into()
            }
        );
        assert_eq!(rx.try_recv().unwrap(), Event::Leave { user: "a".into() });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_queue_survives_dropped_receiver() {
        let (queue, rx) = event_queue();
        drop(rx);
        queue.on_join("a");
    }
}
