//! # Corrente
//!
//! **Corrente** is a minimal asynchronous runtime built from primitives:
//! a single-threaded cooperative scheduler paired with a readiness-based
//! I/O multiplexer, serving many concurrent TCP connections without
//! native threads and without the `async`/`await` machinery.
//!
//! Tasks are explicit state machines implementing [`Resume`]. Each
//! resumption runs a task until it yields a [`Suspend`] request — wait
//! for a socket to become readable or writable, schedule a child task,
//! or voluntarily pause — or until it finishes. The scheduler interleaves
//! all live tasks through a FIFO ready queue and parks I/O-bound tasks on
//! the reactor, which blocks in `epoll` until the OS reports readiness.
//!
//! Deliberately absent: multi-core parallelism, task priorities, timers,
//! cancellation, and any backpressure beyond what TCP itself provides.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use corrente::net::Server;
//! use corrente::{Runtime, Task};
//!
//! let server = Server::bind("127.0.0.1:8082", 64, |socket, _peer| {
//!     Box::new(EchoHandler::new(socket)) as Task
//! })?;
//!
//! let mut rt = Runtime::new();
//! rt.block_on(Box::new(server))?;
//! ```
//!
//! ## Modules
//!
//! - [`runtime`] — Scheduler and the task model
//! - [`net`] — Owned sockets, one-shot suspension primitives, server bootstrap
//! - [`error`] — Error taxonomy

mod reactor;
mod utils;

pub mod error;
pub mod net;
pub mod runtime;

pub use error::{Error, Result};
pub use runtime::Runtime;
pub use runtime::task::{Resume, Step, Suspend, Task};
