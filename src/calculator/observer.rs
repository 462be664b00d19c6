//! Change notification for the observable display properties.
//!
//! Front-ends either register a callback or take a channel receiver.
//! Every assignment to a display string is reported after it happens.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// A display property the UI renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Property {
    /// The main display.
    DisplayContent,
    /// The secondary display with the expression so far.
    OperationTrail,
}

impl Property {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DisplayContent => "display_content",
            Self::OperationTrail => "operation_trail",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property assignment, carrying the new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyChange {
    pub property: Property,
    pub value: String,
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Arc<dyn Fn(&PropertyChange) + Send + Sync>;

/// Registered observers of a calculator.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(ObserverId, Callback)>,
    senders: Vec<flume::Sender<PropertyChange>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every change.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&PropertyChange) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Open an unbounded channel that receives every change.
    ///
    /// Dropping the receiver unregisters it on the next notification.
    pub fn channel(&mut self) -> flume::Receiver<PropertyChange> {
        let (tx, rx) = flume::unbounded();
        self.senders.push(tx);
        rx
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.callbacks.len() + self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver a change to every observer.
    pub fn notify(&mut self, property: Property, value: &str) {
        if self.is_empty() {
            return;
        }

        let change = PropertyChange {
            property,
            value: value.to_string(),
        };

        for (_, callback) in &self.callbacks {
            callback(&change);
        }

        self.senders.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .field("channels", &self.senders.len())
            .finish()
    }
}
