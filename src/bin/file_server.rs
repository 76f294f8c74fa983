//! Demo: a toy LIST/GET file server on top of the corrente runtime.
//!
//! The served directory is read into memory once at startup; each
//! connection is driven by an independent handler task speaking a
//! two-command protocol:
//!
//! - `LIST` — `OK <n>\r\n` followed by one file name per line,
//! - `GET <name>` — the raw file bytes, or `ERROR\r\n` if unknown.
//!
//! Usage: `file_server [addr] [directory]` (defaults:
//! `127.0.0.1:8082`, `./tmp`).

use corrente::net::sock::{OpStep, Recv, SendAll};
use corrente::net::{Server, Socket};
use corrente::{Resume, Runtime, Step, Task};

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::{env, fs, io};

/// Bytes each handler reads per request.
const RECV_SIZE: usize = 1024;

/// In-memory virtualization of a directory: file name to contents.
type Vfs = HashMap<Vec<u8>, Vec<u8>>;

/// Reads every regular file directly under `root` into memory.
fn virtualize(root: &Path) -> io::Result<Vfs> {
    let mut files = Vfs::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned().into_bytes();
        files.insert(name, fs::read(entry.path())?);
    }

    Ok(files)
}

/// Builds the response for one request line.
fn respond(vfs: &Vfs, request: &[u8]) -> Vec<u8> {
    let mut words = request
        .split(|b| b.is_ascii_whitespace())
        .filter(|w| !w.is_empty());

    match (words.next(), words.next(), words.next()) {
        (Some(b"LIST"), None, None) => {
            let mut body = Vec::new();
            for name in vfs.keys() {
                body.extend_from_slice(name);
                body.extend_from_slice(b"\r\n");
            }

            let mut response = format!("OK <{}>\r\n", body.len()).into_bytes();
            response.extend_from_slice(&body);
            response
        }
        (Some(b"GET"), Some(name), None) => vfs
            .get(name)
            .cloned()
            .unwrap_or_else(|| b"ERROR\r\n".to_vec()),
        _ => b"ERROR\r\n".to_vec(),
    }
}

/// Per-connection handler task: read one request, send one response.
struct FileHandler {
    socket: Socket,
    vfs: Rc<Vfs>,
    state: HandlerState,
}

enum HandlerState {
    Receiving(Recv),
    Sending(SendAll),
}

impl FileHandler {
    fn new(socket: Socket, vfs: Rc<Vfs>) -> Self {
        let recv = Recv::new(socket.fd(), RECV_SIZE);

        Self {
            socket,
            vfs,
            state: HandlerState::Receiving(recv),
        }
    }
}

impl Resume for FileHandler {
    fn resume(&mut self) -> corrente::Result<Step> {
        loop {
            match &mut self.state {
                HandlerState::Receiving(recv) => match recv.advance()? {
                    OpStep::Yield(suspend) => return Ok(Step::Suspend(suspend)),
                    OpStep::Done(request) => {
                        if request.is_empty() {
                            // Peer closed; the socket closes with us.
                            return Ok(Step::Finish);
                        }

                        let response = respond(&self.vfs, &request);
                        self.state = HandlerState::Sending(SendAll::new(self.socket.fd(), response));
                    }
                },
                HandlerState::Sending(send) => match send.advance()? {
                    OpStep::Yield(suspend) => return Ok(Step::Suspend(suspend)),
                    OpStep::Done(()) => {
                        self.state = HandlerState::Receiving(Recv::new(self.socket.fd(), RECV_SIZE));
                    }
                },
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "127.0.0.1:8082".to_string());
    let root = args.next().unwrap_or_else(|| "./tmp".to_string());

    let vfs = Rc::new(virtualize(Path::new(&root))?);

    let server = Server::bind(&address, 64, move |socket, _peer| {
        Box::new(FileHandler::new(socket, vfs.clone())) as Task
    })?;

    let mut rt = Runtime::new();
    rt.block_on(Box::new(server))?;

    Ok(())
}
