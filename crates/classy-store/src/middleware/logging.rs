use super::Middleware;
use crate::action::Action;
use crate::dispatcher::Dispatcher;
use serde_json::Value;

/// LoggingMiddleware - logs all actions passing through
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    level: log::Level,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::with_level(log::Level::Debug)
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> log::Level {
        self.level
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &Value, _dispatcher: &Dispatcher) -> bool {
        if action.payload().is_empty() {
            log::log!(self.level, "Action: {}", action.kind());
        } else {
            log::log!(
                self.level,
                "Action: {} {}",
                action.kind(),
                Value::Object(action.payload().clone())
            );
        }

        true // Always pass action through
    }
}
