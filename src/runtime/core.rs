use crate::error::Result;
use crate::reactor::{Interest, Reactor};
use crate::runtime::task::{Step, Suspend, Task};

use std::collections::VecDeque;
use std::os::fd::RawFd;
use tracing::{error, trace};

/// The single-threaded cooperative scheduler.
///
/// A `Runtime` owns the FIFO ready queue and the reactor, and drives
/// every spawned task to completion by resuming it, re-queuing it, or
/// parking it on the reactor. Only one task ever executes at a time, so
/// both structures are accessed strictly sequentially and carry no locks.
///
/// The runtime is an explicit value owned by the caller; there is no
/// ambient global instance.
///
/// # Examples
///
/// ```rust,ignore
/// let mut rt = Runtime::new();
/// rt.spawn(Box::new(accept_loop));
/// rt.run()?;
/// ```
pub struct Runtime {
    /// Tasks ready to be resumed, in scheduling order.
    ready: VecDeque<Task>,

    /// Tasks parked until socket readiness.
    reactor: Reactor,
}

impl Runtime {
    /// Creates an empty runtime.
    pub fn new() -> Self {
        Self {
            ready: VecDeque::new(),
            reactor: Reactor::new(),
        }
    }

    /// Enqueues a task at the back of the ready queue.
    ///
    /// The task starts running once [`run`](Runtime::run) reaches it.
    pub fn spawn(&mut self, task: Task) {
        self.ready.push_back(task);
    }

    /// Spawns `task` and runs the scheduler until every task completed.
    pub fn block_on(&mut self, task: Task) -> Result<()> {
        self.spawn(task);
        self.run()
    }

    /// Runs the scheduler loop until no live task remains.
    ///
    /// Each outer iteration first resumes every task that was ready when
    /// the round started — tasks enqueued during the round (children and
    /// paused tasks) are deferred to the next one, which bounds per-round
    /// work and keeps scheduling fair. It then performs a single blocking
    /// reactor wait if any task is parked on I/O.
    ///
    /// A failure surfaced by an individual task is logged and kills only
    /// that task; the loop and every other live task keep running.
    ///
    /// # Errors
    ///
    /// Only a failure of the reactor wait itself — a runtime-level fault,
    /// not a task fault — aborts the loop.
    pub fn run(&mut self) -> Result<()> {
        while !self.ready.is_empty() || !self.reactor.is_empty() {
            let round = self.ready.len();

            for _ in 0..round {
                let Some(mut task) = self.ready.pop_front() else {
                    break;
                };

                match task.resume() {
                    Ok(Step::Suspend(Suspend::Read(fd))) => self.park(fd, Interest::Read, task),
                    Ok(Step::Suspend(Suspend::Write(fd))) => self.park(fd, Interest::Write, task),
                    Ok(Step::Suspend(Suspend::Schedule(child))) => {
                        // The requester already advanced past its yield
                        // point; it goes back behind the child it spawned.
                        self.ready.push_back(child);
                        self.ready.push_back(task);
                    }
                    Ok(Step::Suspend(Suspend::Pause)) => self.ready.push_back(task),
                    Ok(Step::Finish) => trace!("task finished"),
                    Err(error) => error!(%error, "task failed, dropping it"),
                }
            }

            if !self.reactor.is_empty() {
                for (fd, task) in self.reactor.wait()? {
                    trace!(fd, "socket ready");
                    self.ready.push_back(task);
                }
            }
        }

        Ok(())
    }

    /// Hands a task over to the reactor.
    ///
    /// A rejected registration is fatal for the parking task only.
    fn park(&mut self, fd: RawFd, interest: Interest, task: Task) {
        if let Err(error) = self.reactor.register(fd, interest, task) {
            error!(%error, fd, "failed to park task, dropping it");
        }
    }
}

impl Default for Runtime {
    /// Creates an empty runtime.
    fn default() -> Self {
        Self::new()
    }
}
