use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, KeyEvent};
use octograph_core::{ApiError, CancelToken, ContributionCalendar, LanguageTotal, Repo};

/// Completed fetch payload, tagged with the token the task was spawned with.
pub enum FetchResult {
    Languages(CancelToken, Result<Vec<LanguageTotal>, ApiError>),
    Calendar(CancelToken, Result<ContributionCalendar, ApiError>),
    Repos(CancelToken, Result<Vec<Repo>, ApiError>),
}

pub enum Event {
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
    Fetch(FetchResult),
}

pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(event::Event::Key(key)) => {
                        if event_tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(event::Event::Resize(w, h)) => {
                        if event_tx.send(Event::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {
                        // Prevent event starvation from FocusGained/FocusLost bursts
                        if event_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            } else if event_tx.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Sender handed to spawned fetch tasks so completions arrive on the
    /// same channel as input events.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
