//! Clipboard Copy
//!
//! Copies a code and clears it again once it has expired.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use zeroize::Zeroize;

static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

/// Copy `text`, then clear the clipboard after `timeout` unless a newer copy
/// has replaced it in the meantime.
pub fn copy_with_timeout(text: &str, timeout: Duration) {
    let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
    let mut text = text.to_string();

    std::thread::spawn(move || copy_thread(&mut text, timeout, copy_id));
}

fn copy_thread(text: &mut String, timeout: Duration, copy_id: u64) {
    let Ok(mut clipboard) = arboard::Clipboard::new() else {
        return;
    };

    if clipboard.set_text(&*text).is_err() {
        return;
    }

    std::thread::sleep(timeout);
    text.zeroize();

    if CLIPBOARD_COPY_ID.load(Ordering::SeqCst) == copy_id {
        let _ = clipboard.clear();
    }
}
