use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

use crate::command::AppResult;

/// Terminal events.
#[derive(Clone, Debug)]
pub enum Event {
    /// Terminal tick.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Terminal resize, carrying the new number of rows.
    Resize(u16),
    /// Bracketed paste.
    Paste(String),
}

/// Terminal event handler.
///
/// Reads crossterm events on a background thread and forwards them over a
/// channel, emitting a [`Event::Tick`] whenever `tick_rate` passes quietly.
#[derive(Debug)]
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
    /// Event handler thread.
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`].
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::channel();
        let handler = thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(tick_rate);

                let polled = match event::poll(timeout) {
                    Ok(ready) => ready,
                    Err(err) => {
                        log::error!("unable to poll for terminal events: {err}");
                        return;
                    }
                };

                if polled {
                    let forwarded = match event::read() {
                        Ok(CrosstermEvent::Key(e)) => Some(Event::Key(e)),
                        Ok(CrosstermEvent::Resize(_, rows)) => Some(Event::Resize(rows)),
                        Ok(CrosstermEvent::Paste(text)) => Some(Event::Paste(text)),
                        Ok(_) => None,
                        Err(err) => {
                            log::error!("unable to read terminal event: {err}");
                            return;
                        }
                    };
                    // The receiver hangs up once the session is over.
                    if let Some(e) = forwarded {
                        if sender.send(e).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });
        Self { receiver, handler }
    }

    /// Receive the next event from the handler thread.
    ///
    /// This function will always block the current thread if
    /// there is no data available and it's possible for more data to be sent.
    pub fn next(&self) -> AppResult<Event> {
        Ok(self.receiver.recv()?)
    }
}
