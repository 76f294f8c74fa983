#[cfg(test)]
mod tests {
    use corrente::net::sock::{Accept, OpStep, Recv, SendAll};
    use corrente::net::{Listener, Socket};
    use corrente::{Resume, Result, Runtime, Step, Suspend};

    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::thread;

    /// Echoes every received chunk back until the peer closes.
    struct Echo {
        socket: Socket,
        max: usize,
        state: EchoState,
    }

    enum EchoState {
        Receiving(Recv),
        Sending(SendAll),
    }

    impl Echo {
        fn new(socket: Socket, max: usize) -> Self {
            let recv = Recv::new(socket.fd(), max);

            Self {
                socket,
                max,
                state: EchoState::Receiving(recv),
            }
        }
    }

    impl Resume for Echo {
        fn resume(&mut self) -> Result<Step> {
            loop {
                match &mut self.state {
                    EchoState::Receiving(recv) => match recv.advance()? {
                        OpStep::Yield(suspend) => return Ok(Step::Suspend(suspend)),
                        OpStep::Done(chunk) => {
                            if chunk.is_empty() {
                                return Ok(Step::Finish);
                            }

                            self.state =
                                EchoState::Sending(SendAll::new(self.socket.fd(), chunk));
                        }
                    },
                    EchoState::Sending(send) => match send.advance()? {
                        OpStep::Yield(suspend) => return Ok(Step::Suspend(suspend)),
                        OpStep::Done(()) => {
                            self.state =
                                EchoState::Receiving(Recv::new(self.socket.fd(), self.max));
                        }
                    },
                }
            }
        }
    }

    /// Accepts exactly `remaining` connections, spawning an echo handler
    /// for each, then finishes so the runtime can drain and exit.
    struct AcceptN {
        listener: Listener,
        remaining: usize,
        max: usize,
        accept: Accept,
    }

    impl AcceptN {
        fn new(listener: Listener, count: usize, max: usize) -> Self {
            let accept = Accept::new(listener.fd());

            Self {
                listener,
                remaining: count,
                max,
                accept,
            }
        }
    }

    impl Resume for AcceptN {
        fn resume(&mut self) -> Result<Step> {
            if self.remaining == 0 {
                return Ok(Step::Finish);
            }

            match self.accept.advance()? {
                OpStep::Yield(suspend) => Ok(Step::Suspend(suspend)),
                OpStep::Done((socket, _peer)) => {
                    self.remaining -= 1;
                    self.accept = Accept::new(self.listener.fd());

                    let handler = Box::new(Echo::new(socket, self.max));
                    Ok(Step::Suspend(Suspend::Schedule(handler)))
                }
            }
        }
    }

    #[test]
    fn ping_echo_round_trip() {
        let listener = Listener::bind("127.0.0.1:0", 16).expect("failed to bind listener");
        let addr = listener.local_addr().expect("failed to get local address");

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).expect("failed to connect");
            stream.write_all(b"PING").expect("failed to send");

            let mut buffer = [0; 4];
            stream.read_exact(&mut buffer).expect("failed to read echo");
            assert_eq!(&buffer, b"PING");
        });

        let mut rt = Runtime::new();
        rt.spawn(Box::new(AcceptN::new(listener, 1, 1024)));
        rt.run().expect("runtime failed");

        client.join().expect("client thread panicked");
    }

    #[test]
    fn immediate_close_terminates_the_handler() {
        let listener = Listener::bind("127.0.0.1:0", 16).expect("failed to bind listener");
        let addr = listener.local_addr().expect("failed to get local address");

        let client = thread::spawn(move || {
            let stream = TcpStream::connect(addr).expect("failed to connect");
            drop(stream);
        });

        // The handler sees an empty receive, finishes, and the runtime
        // drains; reaching the end of run() is the assertion.
        let mut rt = Runtime::new();
        rt.spawn(Box::new(AcceptN::new(listener, 1, 1024)));
        rt.run().expect("runtime failed");

        client.join().expect("client thread panicked");
    }

    #[test]
    fn interleaved_clients_get_only_their_own_bytes() {
        let listener = Listener::bind("127.0.0.1:0", 16).expect("failed to bind listener");
        let addr = listener.local_addr().expect("failed to get local address");

        let spawn_client = |tag: &'static str| {
            thread::spawn(move || {
                let mut stream = TcpStream::connect(addr).expect("failed to connect");

                for part in ["one", "two"] {
                    let message = format!("{tag}-{part}");
                    stream
                        .write_all(message.as_bytes())
                        .expect("failed to send");

                    let mut buffer = vec![0; message.len()];
                    stream.read_exact(&mut buffer).expect("failed to read echo");
                    assert_eq!(buffer, message.as_bytes());
                }
            })
        };

        let alpha = spawn_client("alpha");
        let beta = spawn_client("beta");

        let mut rt = Runtime::new();
        rt.spawn(Box::new(AcceptN::new(listener, 2, 1024)));
        rt.run().expect("runtime failed");

        alpha.join().expect("alpha client panicked");
        beta.join().expect("beta client panicked");
    }

    #[test]
    fn recv_honors_the_byte_limit() {
        let listener = Listener::bind("127.0.0.1:0", 16).expect("failed to bind listener");
        let addr = listener.local_addr().expect("failed to get local address");

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).expect("failed to connect");
            stream.write_all(b"PING").expect("failed to send");

            // The handler reads two bytes at a time; the echo still
            // arrives complete and in order.
            let mut buffer = [0; 4];
            stream.read_exact(&mut buffer).expect("failed to read echo");
            assert_eq!(&buffer, b"PING");
        });

        let mut rt = Runtime::new();
        rt.spawn(Box::new(AcceptN::new(listener, 1, 2)));
        rt.run().expect("runtime failed");

        client.join().expect("client thread panicked");
    }
}
