use super::listener::Listener;
use super::sock::{Accept, OpStep};
use super::socket::Socket;
use crate::error::Result;
use crate::runtime::task::{Resume, Step, Suspend, Task};

use std::io;
use std::net::SocketAddr;
use tracing::{debug, info};

/// The accept-loop task of a TCP server.
///
/// `Server` binds a listening socket and, once spawned onto a
/// [`Runtime`](crate::Runtime), loops forever: it accepts a connection,
/// spawns an independent handler task built by the factory, and goes
/// back to accepting. Handlers are fire-and-forget; the accept loop
/// never waits for them.
///
/// The listening socket is owned by this task and closes on every exit
/// path, including a failing `accept`.
///
/// # Examples
///
/// ```rust,ignore
/// let server = Server::bind("127.0.0.1:8082", 64, |socket, _peer| {
///     Box::new(EchoHandler::new(socket)) as Task
/// })?;
///
/// let mut rt = Runtime::new();
/// rt.block_on(Box::new(server))?;
/// ```
pub struct Server<F> {
    listener: Listener,
    factory: F,
    accept: Accept,
}

impl<F> Server<F>
where
    F: FnMut(Socket, SocketAddr) -> Task,
{
    /// Binds `address` with the given backlog and prepares the accept loop.
    ///
    /// `factory` is invoked once per accepted connection and returns the
    /// handler task that exclusively owns that connection's socket.
    pub fn bind(address: &str, backlog: i32, factory: F) -> io::Result<Self> {
        let listener = Listener::bind(address, backlog)?;

        info!(addr = %listener.local_addr()?, "listening");

        let accept = Accept::new(listener.fd());

        Ok(Self {
            listener,
            factory,
            accept,
        })
    }
}

impl<F> Resume for Server<F>
where
    F: FnMut(Socket, SocketAddr) -> Task,
{
    /// Accepts the next connection and schedules its handler.
    fn resume(&mut self) -> Result<Step> {
        match self.accept.advance()? {
            OpStep::Yield(suspend) => Ok(Step::Suspend(suspend)),
            OpStep::Done((socket, peer)) => {
                debug!(%peer, "accepted connection");

                let handler = (self.factory)(socket, peer);
                self.accept = Accept::new(self.listener.fd());

                Ok(Step::Suspend(Suspend::Schedule(handler)))
            }
        }
    }
}
