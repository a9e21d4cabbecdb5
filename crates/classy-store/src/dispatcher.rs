//! Follow-up actions from middleware
//!
//! A middleware runs while the store holds its middleware lock, so it cannot
//! call [`Store::dispatch`](crate::Store::dispatch) itself. It hands follow-ups
//! to the [`Dispatcher`] instead. When the current action has been reduced,
//! the store takes everything queued, in order, and dispatches each action
//! from the top of the middleware chain on the same thread. If the current
//! action fails, the queue is emptied and the follow-ups are dropped.

use crate::action::Action;
use std::sync::mpsc::Sender;

/// Queue handle shared by a store and its middleware
#[derive(Clone, Debug)]
pub struct Dispatcher {
    queue: Sender<Action>,
}

impl Dispatcher {
    pub fn new(queue: Sender<Action>) -> Self {
        Self { queue }
    }

    /// Queue `action` behind the one being dispatched
    ///
    /// Never blocks. An action queued after its store is gone is logged and
    /// dropped.
    pub fn dispatch(&self, action: Action) {
        let kind = action.kind().to_owned();
        if self.queue.send(action).is_err() {
            log::error!("Store is gone, dropping queued action {}", kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_queues_actions_in_order() {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Dispatcher::new(tx);

        dispatcher.dispatch(Action::new("PING"));
        dispatcher.clone().dispatch(Action::new("PONG"));

        let kinds: Vec<String> = rx.try_iter().map(|a| a.kind().to_owned()).collect();
        assert_eq!(kinds, vec!["PING", "PONG"]);
    }

    #[test]
    fn test_dispatch_after_receiver_dropped_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        Dispatcher::new(tx).dispatch(Action::new("PING"));
    }
}
