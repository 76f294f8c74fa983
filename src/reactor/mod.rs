//! Reactor core and event handling.
//!
//! This module implements the reactor component of the runtime: the
//! single place where the scheduler thread blocks waiting for the OS to
//! report socket readiness.
//!
//! The reactor owns a table mapping each registered socket to exactly one
//! waiting task. Registrations are single-shot and are consumed the
//! moment they fire.
//!
//! Runtime users never interact with the reactor directly; tasks reach it
//! by yielding [`Suspend::Read`](crate::Suspend::Read) or
//! [`Suspend::Write`](crate::Suspend::Write) to the scheduler.

mod core;
mod event;
mod poller;

pub(crate) use self::core::{Interest, Reactor};
pub(crate) use self::poller::platform;
