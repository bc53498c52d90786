use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Something that can run a task after a delay. Dropping the returned
/// handle must cancel the task if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` through gloo; dropping a [`Timeout`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Scheduler for BrowserTimers {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Trailing-edge debounce: only the last call of a burst runs, `wait_ms`
/// after it was made.
pub struct Debounced<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    func: Rc<dyn Fn(A)>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn new<F>(scheduler: S, wait_ms: u32, func: F) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            scheduler,
            wait_ms,
            func: Rc::new(func),
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self, arg: A) {
        let func = Rc::clone(&self.func);
        let handle = self.scheduler.schedule(self.wait_ms, Box::new(move || func(arg)));
        // Replacing the handle drops, and so cancels, the previous timer.
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

pub fn debounce<A, F>(wait_ms: u32, func: F) -> Debounced<BrowserTimers, A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced::new(BrowserTimers, wait_ms, func)
}
