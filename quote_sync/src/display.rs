//! Terminal rendering of merge notifications.
//!
//! Sync workers send notifications over a channel; the display loop posts them on
//! a `NotificationBoard` and reprints the visible set whenever it changes, either
//! because a new notification arrived or because an old one was dismissed.
use std::io::Write;
use std::time::Duration;

use crossbeam_channel::{Receiver, select, tick};
use quote_common::Result;
use quote_common::notify::{Notification, NotificationBoard, Notifier};

/// Runs until `stop_rx` yields or every notification sender is gone.
pub fn run_display<W: Write>(
    board: &NotificationBoard,
    notes_rx: &Receiver<Notification>,
    stop_rx: &Receiver<()>,
    refresh: Duration,
    out: &mut W,
) -> Result<()> {
    let refresher = tick(refresh);
    let mut shown: Vec<Notification> = Vec::new();

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(notes_rx) -> msg => match msg {
                Ok(note) => board.notify(note),
                Err(_) => break,
            },
            recv(refresher) -> _ => {},
        }

        let visible = board.visible();
        if visible != shown {
            render(&visible, out)?;
            shown = visible;
        }
    }
    Ok(())
}

/// Prints the visible notifications, or a placeholder when none are left.
pub fn render<W: Write>(visible: &[Notification], out: &mut W) -> Result<()> {
    if visible.is_empty() {
        writeln!(out, "(no notifications)")?;
    }
    for note in visible {
        writeln!(out, "* {}", note)?;
    }
    out.flush()?;
    Ok(())
}
