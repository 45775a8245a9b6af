//! Queue of generation events between the workspace and the egui frame loop.
//!
//! The workspace emits turn and transcript events, the generation client
//! adds `Throttled` and `Retrying` while it waits. The UI drains everything
//! once per frame, so a status line can follow a long backoff.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use sitegen_types::event::GenerationEvent;

/// Handle to one queue; clones share it.
#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<GenerationEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: GenerationEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Take every queued event in emission order.
    pub fn drain(&self) -> Vec<GenerationEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// True while the UI has events it has not seen yet.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
