//! Non-blocking TCP networking.
//!
//! Owned socket types ([`Listener`], [`Socket`]), the one-shot
//! suspension primitives ([`sock`]), and the accept-loop server
//! bootstrap ([`Server`]).

mod listener;
mod server;
mod socket;

pub mod sock;

pub use listener::Listener;
pub use server::Server;
pub use socket::Socket;
