//! Single-slot button command mailbox
//!
//! The tick handler posts, the foreground takes. There is no queue: a
//! command posted before the previous one was taken replaces it.

use portable_atomic::{AtomicU8, Ordering};

use super::buttons::ButtonCommand;

/// Stored byte for "no command"
const EMPTY: u8 = 0;

/// Last-write-wins command slot
pub struct CommandMailbox {
    slot: AtomicU8,
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Store a command, replacing any unread one
    pub fn post(&self, command: ButtonCommand) {
        self.slot.store(command.to_byte(), Ordering::Release);
    }

    /// Take the pending command, leaving the slot empty
    pub fn take(&self) -> Option<ButtonCommand> {
        ButtonCommand::from_byte(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    pub fn clear(&self) {
        self.slot.store(EMPTY, Ordering::Release);
    }

    pub fn is_empty(&self) -> bool {
        self.slot.load(Ordering::Acquire) == EMPTY
    }
}

impl Default for CommandMailbox {
    fn default() -> Self {
        Self::new()
    }
}
