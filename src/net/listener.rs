use crate::reactor::platform::{
    sys_bind, sys_close, sys_ipv6_dual_stack, sys_listen, sys_parse_sockaddr, sys_set_reuseaddr,
    sys_socket, sys_sockname,
};

use std::io;
use std::net::SocketAddr;
use std::os::fd::RawFd;

/// A non-blocking TCP listening socket.
///
/// The listener is exclusively owned by the accept-loop task using it
/// and is closed on drop, so it is released on every exit path of that
/// task, including failure.
pub struct Listener {
    /// File descriptor of the listening socket.
    fd: RawFd,
}

impl Listener {
    /// Binds a listening socket to the given address.
    ///
    /// The address must be a valid socket address string, such as
    /// `"127.0.0.1:8082"` or `"[::1]:8082"`.
    ///
    /// This function:
    /// - creates a non-blocking socket,
    /// - enables `SO_REUSEADDR`,
    /// - configures IPv6 dual-stack if applicable,
    /// - binds and starts listening with the given backlog.
    pub fn bind(address: &str, backlog: i32) -> io::Result<Self> {
        let (storage, len) = sys_parse_sockaddr(address)?;
        let domain = storage.ss_family as i32;

        let fd = sys_socket(domain)?;

        let listener = Self { fd };

        sys_set_reuseaddr(fd)?;
        sys_ipv6_dual_stack(fd, domain)?;
        sys_bind(fd, &storage, len)?;
        sys_listen(fd, backlog)?;

        Ok(listener)
    }

    /// Returns the raw file descriptor, for use with
    /// [`sock::Accept`](crate::net::sock::Accept).
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// Returns the local socket address of this listener.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        sys_sockname(self.fd)
    }
}

impl Drop for Listener {
    /// Closes the listening socket.
    fn drop(&mut self) {
        sys_close(self.fd);
    }
}
