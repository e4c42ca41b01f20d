//! The terminal as the showcase's host: the projects list is the scrollable
//! document and the system browser is the navigator.

use tracing::{info, warn};

use folio_core::{Navigator, ScrollState, Viewport};

#[derive(Debug, Default)]
pub struct TerminalHost {
    pub scroll: ScrollState,
}

impl Viewport for TerminalHost {
    fn scroll_offset(&self) -> u32 {
        self.scroll.scroll_offset()
    }

    fn lock_scroll(&mut self, offset: u32) {
        self.scroll.lock_scroll(offset);
    }

    fn unlock_scroll(&mut self) {
        self.scroll.unlock_scroll();
    }

    fn scroll_to(&mut self, offset: u32) {
        self.scroll.scroll_to(offset);
    }
}

impl Navigator for TerminalHost {
    /// Fire-and-forget: a browser that fails to launch is only logged.
    fn open_url(&mut self, url: &str) {
        match webbrowser::open(url) {
            Ok(()) => info!(url, "opened in browser"),
            Err(e) => warn!(url, error = %e, "failed to open browser"),
        }
    }
}
