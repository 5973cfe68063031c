//! Loading indicator driven by wizard display changes

use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::watch;

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// One background task animating whatever message is currently shown
///
/// `show` and `hide` only publish the desired state, so they are cheap to
/// call from an observer on every state change. The task is aborted on drop.
/// Must be created inside a tokio runtime.
pub struct Spinner {
    message: watch::Sender<Option<String>>,
    handle: tokio::task::JoinHandle<()>,
}

impl Spinner {
    /// Spawn the animation task with nothing shown
    pub fn spawn() -> Self {
        let (message, rx) = watch::channel(None);
        let handle = tokio::spawn(animate(rx));
        Self { message, handle }
    }

    /// Spawn and immediately show `message`
    pub fn start(message: impl Into<String>) -> Self {
        let spinner = Self::spawn();
        spinner.show(message);
        spinner
    }

    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        self.message.send_if_modified(|current| {
            if current.as_deref() == Some(message.as_str()) {
                return false;
            }
            *current = Some(message);
            true
        });
    }

    pub fn hide(&self) {
        self.message.send_if_modified(|m| m.take().is_some());
    }

    pub fn is_visible(&self) -> bool {
        self.message.borrow().is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.handle.abort();
        if self.is_visible() {
            clear_line();
        }
    }
}

async fn animate(mut rx: watch::Receiver<Option<String>>) {
    let mut frame = 0usize;

    loop {
        let current = rx.borrow_and_update().clone();
        match current {
            None => {
                clear_line();
                if rx.changed().await.is_err() {
                    return;
                }
            }
            Some(message) => {
                print!("\r{} {}", FRAMES[frame % FRAMES.len()], message);
                let _ = io::stdout().flush();
                frame += 1;

                tokio::select! {
                    _ = tokio::time::sleep(FRAME_INTERVAL) => {}
                    changed = rx.changed() => {
                        if changed.is_err() {
                            clear_line();
                            return;
                        }
                    }
                }
            }
        }
    }
}

fn clear_line() {
    print!("\r\x1b[K");
    let _ = io::stdout().flush();
}
