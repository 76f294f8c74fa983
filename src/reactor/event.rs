/// A readiness event reported by the poller.
pub(crate) struct Event {
    /// Registration token carried through the poller payload.
    pub(crate) token: usize,
    /// The descriptor can be read without blocking.
    pub(crate) readable: bool,
    /// The descriptor can be written without blocking.
    pub(crate) writable: bool,
}
