use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Host, Task};
use crate::timing::TimingSource;

#[derive(Default)]
struct PageState {
    load_listeners: Vec<Task>,
    timeouts: VecDeque<Task>,
    idle: VecDeque<Task>,
    loaded: bool,
}

/// A single-threaded page event loop.
///
/// Load subscribers run in order when [`Page::fire_load`] is called;
/// deferred tasks run from [`Page::run_until_idle`], zero-delay timeouts
/// first and idle callbacks only once no timeout is pending.
pub struct Page {
    timing: Option<Rc<dyn TimingSource>>,
    idle_callbacks: bool,
    state: RefCell<PageState>,
}

impl Page {
    /// A page with timing support and idle callbacks.
    pub fn new(timing: Rc<dyn TimingSource>) -> Self {
        Self {
            timing: Some(timing),
            idle_callbacks: true,
            state: RefCell::new(PageState::default()),
        }
    }

    /// A page on a host without any timing support.
    pub fn without_timing() -> Self {
        Self {
            timing: None,
            idle_callbacks: true,
            state: RefCell::new(PageState::default()),
        }
    }

    /// Toggle idle callback support (older hosts lack it).
    pub fn with_idle_callbacks(mut self, enabled: bool) -> Self {
        self.idle_callbacks = enabled;
        self
    }

    /// Fire the load event. Subscribers run once; firing again is a no-op.
    pub fn fire_load(&self) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if state.loaded {
                return;
            }
            state.loaded = true;
            std::mem::take(&mut state.load_listeners)
        };
        for listener in listeners {
            listener();
        }
    }

    /// Drain deferred work, including tasks queued while draining.
    /// Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.next_task() {
            task();
            ran += 1;
        }
        ran
    }

    pub fn pending_tasks(&self) -> usize {
        let state = self.state.borrow();
        state.timeouts.len() + state.idle.len()
    }

    fn next_task(&self) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        state.timeouts.pop_front().or_else(|| state.idle.pop_front())
    }
}

impl Host for Page {
    fn timing(&self) -> Option<Rc<dyn TimingSource>> {
        self.timing.clone()
    }

    fn on_load(&self, handler: Task) {
        self.state.borrow_mut().load_listeners.push(handler);
    }

    fn supports_idle_callback(&self) -> bool {
        self.idle_callbacks
    }

    fn request_idle_callback(&self, task: Task) {
        if self.idle_callbacks {
            self.state.borrow_mut().idle.push_back(task);
        } else {
            // Hosts without the primitive still get the work done.
            self.set_timeout(task);
        }
    }

    fn set_timeout(&self, task: Task) {
        self.state.borrow_mut().timeouts.push_back(task);
    }
}
