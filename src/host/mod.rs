//! Host capabilities the monitor relies on.
//!
//! A host is the page runtime: it owns the timing buffers, fires the load
//! event and runs deferred tasks on its single cooperative thread.

mod page;

pub use page::Page;

use std::rc::Rc;

use crate::timing::TimingSource;

/// A unit of deferred work on the host's thread.
pub type Task = Box<dyn FnOnce()>;

pub trait Host {
    /// The timing subsystem, or `None` when the host has no timing support.
    fn timing(&self) -> Option<Rc<dyn TimingSource>>;

    /// Append a load event subscriber. Subscribers run in registration order.
    fn on_load(&self, handler: Task);

    /// Whether [`Host::request_idle_callback`] is available.
    fn supports_idle_callback(&self) -> bool;

    /// Run `task` when the thread is otherwise idle.
    fn request_idle_callback(&self, task: Task);

    /// Run `task` on a later turn of the event loop with no delay.
    fn set_timeout(&self, task: Task);
}
