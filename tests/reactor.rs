#[cfg(test)]
mod tests {
    use corrente::{Resume, Result, Runtime, Step, Suspend};
    use std::cell::Cell;
    use std::os::fd::RawFd;
    use std::rc::Rc;

    /// Waits for readability once, then records that it completed.
    struct WaitRead {
        fd: RawFd,
        armed: bool,
        completed: Rc<Cell<bool>>,
    }

    impl Resume for WaitRead {
        fn resume(&mut self) -> Result<Step> {
            if !self.armed {
                self.armed = true;
                return Ok(Step::Suspend(Suspend::Read(self.fd)));
            }

            self.completed.set(true);
            Ok(Step::Finish)
        }
    }

    /// A readable pipe, so readiness fires without any TCP setup.
    fn readable_pipe() -> (RawFd, RawFd) {
        let mut fds = [0; 2];
        let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
        assert_eq!(rc, 0, "pipe failed");

        let n = unsafe { libc::write(fds[1], b"x".as_ptr() as *const _, 1) };
        assert_eq!(n, 1, "pipe write failed");

        (fds[0], fds[1])
    }

    #[test]
    fn double_registration_kills_only_the_second_waiter() {
        let (read_fd, write_fd) = readable_pipe();

        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));

        let mut rt = Runtime::new();
        rt.spawn(Box::new(WaitRead {
            fd: read_fd,
            armed: false,
            completed: first.clone(),
        }));
        rt.spawn(Box::new(WaitRead {
            fd: read_fd,
            armed: false,
            completed: second.clone(),
        }));

        rt.run().expect("runtime failed");

        // The first task owns the registration and completes; the second
        // violated the one-registration-per-socket invariant and was
        // dropped without ever being resumed again.
        assert!(first.get(), "first waiter never completed");
        assert!(!second.get(), "second waiter should have been dropped");

        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
    }

    #[test]
    fn parked_task_resumes_after_readiness() {
        let (read_fd, write_fd) = readable_pipe();

        let completed = Rc::new(Cell::new(false));

        let mut rt = Runtime::new();
        rt.spawn(Box::new(WaitRead {
            fd: read_fd,
            armed: false,
            completed: completed.clone(),
        }));

        rt.run().expect("runtime failed");

        assert!(completed.get(), "parked task never resumed");

        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
    }
}
