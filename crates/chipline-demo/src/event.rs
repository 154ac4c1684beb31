//! Event handling for the demo terminal loop.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the demo.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Text was pasted (from bracketed paste mode).
    Paste(String),
    /// A tick event for periodic updates.
    Tick,
}

/// Reads terminal events into a channel.
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Start the event loop.
    pub fn start(&self) -> EventLoopHandle {
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let tick_rate = Duration::from_millis(250);

            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if sender.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if sender.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Paste(text)) => {
                            if sender.send(Event::Paste(text)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!("Error reading event: {}", e);
                        }
                    }
                } else if sender.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        EventLoopHandle { handle }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the event loop task.
pub struct EventLoopHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Abort the event loop.
    pub fn abort(self) {
        self.handle.abort();
    }
}
