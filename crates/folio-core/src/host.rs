//! Host environment seam.
//!
//! The showcase never scrolls or navigates on its own; it asks the host.
//! [`Viewport`] covers the document scroll position and its lock,
//! [`Navigator`] covers opening external links. [`ScrollState`] is a
//! ready-made viewport for hosts that keep scroll state in memory.

/// Document scroll position, owned by the host.
pub trait Viewport {
    /// Current vertical offset.
    fn scroll_offset(&self) -> u32;

    /// Pin the document at `offset` and refuse further scrolling.
    fn lock_scroll(&mut self, offset: u32);

    /// Release a previous lock.
    fn unlock_scroll(&mut self);

    /// Jump to `offset`.
    fn scroll_to(&mut self, offset: u32);
}

/// Fire-and-forget navigation to an external reference.
pub trait Navigator {
    fn open_url(&mut self, url: &str);
}

/// Everything the showcase needs from its environment.
pub trait Host: Viewport + Navigator {}

impl<T: Viewport + Navigator> Host for T {}

/// In-memory scroll position with a lock and an upper bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: u32,
    max: u32,
    locked: bool,
}

impl ScrollState {
    pub fn new(max: u32) -> Self {
        Self {
            offset: 0,
            max,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Change the scrollable extent, clamping the offset into it.
    ///
    /// While locked the offset is left alone so it can be restored later.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        if !self.locked {
            self.offset = self.offset.min(max);
        }
    }

    /// User scroll request. Ignored while locked.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        if self.locked {
            return false;
        }
        let next = self.offset.saturating_add_signed(delta).min(self.max);
        let moved = next != self.offset;
        self.offset = next;
        moved
    }
}

impl Viewport for ScrollState {
    fn scroll_offset(&self) -> u32 {
        self.offset
    }

    fn lock_scroll(&mut self, offset: u32) {
        self.offset = offset;
        self.locked = true;
    }

    fn unlock_scroll(&mut self) {
        self.locked = false;
    }

    fn scroll_to(&mut self, offset: u32) {
        self.offset = offset.min(self.max);
    }
}
