//! Deferred execution after page load.
//!
//! Collection is auxiliary work and must not compete with the page: the
//! callback is only queued once the load event has fired, and then runs
//! when the host is idle (or on the next event loop turn).

use std::rc::Rc;

use crate::host::{Host, Task};

/// How the callback is deferred once load has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    Idle,
    Timeout,
}

impl Deferral {
    /// Prefer idle callbacks when the host has them.
    pub fn for_host(host: &dyn Host) -> Self {
        if host.supports_idle_callback() {
            Deferral::Idle
        } else {
            Deferral::Timeout
        }
    }
}

/// Run `callback` once, after the load event.
///
/// The callback subscribes after any existing load subscriber, so handlers
/// registered earlier always run first.
pub fn arm(host: &Rc<dyn Host>, callback: Task) -> Deferral {
    let deferral = Deferral::for_host(host.as_ref());
    let deferred_on = Rc::clone(host);
    host.on_load(Box::new(move || match deferral {
        Deferral::Idle => deferred_on.request_idle_callback(callback),
        Deferral::Timeout => deferred_on.set_timeout(callback),
    }));
    deferral
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Page;
    use crate::timing::TimingSnapshot;
    use std::cell::RefCell;

    fn host(idle: bool) -> (Rc<Page>, Rc<dyn Host>) {
        let page = Rc::new(Page::new(Rc::new(TimingSnapshot::default())).with_idle_callbacks(idle));
        let host: Rc<dyn Host> = page.clone();
        (page, host)
    }

    #[test]
    fn callback_waits_for_load_and_a_free_turn() {
        let (page, host) = host(true);
        let ran = Rc::new(RefCell::new(0));
        let r = Rc::clone(&ran);
        assert_eq!(arm(&host, Box::new(move || *r.borrow_mut() += 1)), Deferral::Idle);

        assert_eq!(page.run_until_idle(), 0);
        page.fire_load();
        // Load handler only queued the work.
        assert_eq!(*ran.borrow(), 0);
        page.run_until_idle();
        assert_eq!(*ran.borrow(), 1);

        page.fire_load();
        page.run_until_idle();
        assert_eq!(*ran.borrow(), 1);
    }

    #[test]
    fn falls_back_to_timeout_without_idle_support() {
        let (page, host) = host(false);
        let ran = Rc::new(RefCell::new(false));
        let r = Rc::clone(&ran);
        assert_eq!(arm(&host, Box::new(move || *r.borrow_mut() = true)), Deferral::Timeout);
        page.fire_load();
        assert_eq!(page.run_until_idle(), 1);
        assert!(*ran.borrow());
    }

    #[test]
    fn existing_load_handler_runs_first() {
        let (page, host) = host(true);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        host.on_load(Box::new(move || o.borrow_mut().push("page handler")));
        let o = Rc::clone(&order);
        arm(&host, Box::new(move || o.borrow_mut().push("report")));

        page.fire_load();
        page.run_until_idle();
        assert_eq!(*order.borrow(), vec!["page handler", "report"]);
    }
}
