//! Single-shot sequential task runner.
//!
//! Tasks run in append order on one worker thread. Before each task the
//! worker polls the runner's cancellation token; the controlling thread
//! races the worker's completion handoff against a one-shot deadline.

use crate::sync::CancelToken;
use crossbeam_channel::{after, bounded, select, Receiver};
use log::{debug, error, trace};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Terminal error for a run
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The deadline elapsed before the worker reported completion
    #[error("execution timed out after {0:?}")]
    TimedOut(Duration),

    /// An interrupt was observed between tasks
    #[error("execution interrupted")]
    Interrupted,
}

/// A queued unit of work; receives its own position in the task list
type Task = Box<dyn FnOnce(usize) + Send + 'static>;

/// A single-shot sequential executor for an ordered task list.
///
/// The deadline is armed when the runner is constructed, not when
/// [`start`](TaskRunner::start) is called. Cancellation is cooperative:
/// the token is polled between tasks only, so a task already in flight
/// runs to completion before an interrupt takes effect.
pub struct TaskRunner {
    /// Ordered task list; immutable once the run starts
    tasks: Vec<Task>,

    /// Time budget for the whole run, kept for the timeout error
    timeout: Duration,

    /// One-shot deadline timer armed at construction
    deadline: Receiver<Instant>,

    /// External abort indicator, polled by the worker between tasks
    interrupt: CancelToken,
}

impl TaskRunner {
    /// Create a runner with an empty task list and the given time budget.
    pub fn new(timeout: Duration) -> Self {
        Self {
            tasks: Vec::new(),
            timeout,
            deadline: after(timeout),
            interrupt: CancelToken::new(),
        }
    }

    /// Append a task to the run. Each task is handed its own index.
    pub fn add_task<F>(&mut self, task: F)
    where
        F: FnOnce(usize) + Send + 'static,
    {
        self.tasks.push(Box::new(task));
    }

    /// Get a handle for requesting an interrupt from another thread.
    ///
    /// The handle may be set at any time, including before the run starts;
    /// the worker observes it before each task.
    pub fn interrupt_handle(&self) -> CancelToken {
        self.interrupt.clone()
    }

    /// Run the task list to a terminal outcome.
    ///
    /// Blocks until the worker finishes, an interrupt is observed between
    /// tasks, or the deadline fires. On timeout the worker is not
    /// cancelled; it may keep running its current tasks unobserved while
    /// the error is returned immediately.
    pub fn start(self) -> Result<(), RunnerError> {
        let TaskRunner {
            tasks,
            timeout,
            deadline,
            interrupt,
        } = self;

        debug!(
            "starting run of {} tasks with a {:?} budget",
            tasks.len(),
            timeout
        );

        // Capacity 1 so the orphaned worker's final send never blocks once
        // the controller has returned on timeout.
        let (complete_tx, complete_rx) = bounded(1);

        thread::spawn(move || {
            let _ = complete_tx.send(run_tasks(tasks, &interrupt));
        });

        select! {
            recv(complete_rx) -> outcome => {
                // The worker always reports before exiting
                outcome.expect("worker exited without reporting an outcome")
            }
            recv(deadline) -> _ => {
                debug!("deadline elapsed, abandoning worker");
                Err(RunnerError::TimedOut(timeout))
            }
        }
    }
}

/// Worker loop: run each task in order, polling for interrupts in between.
fn run_tasks(tasks: Vec<Task>, interrupt: &CancelToken) -> Result<(), RunnerError> {
    for (index, task) in tasks.into_iter().enumerate() {
        if interrupt.is_cancelled() {
            debug!("interrupt observed before task {}, halting", index);
            return Err(RunnerError::Interrupted);
        }

        trace!("running task {}", index);

        // A panicking task must not take the worker down with it
        if catch_unwind(AssertUnwindSafe(|| task(index))).is_err() {
            error!("task {} panicked", index);
        }
    }

    Ok(())
}
