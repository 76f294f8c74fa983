#[cfg(target_os = "linux")]
mod epoll;

#[cfg(target_os = "linux")]
pub(crate) use epoll::EpollPoller as Poller;

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(unix)]
pub(crate) use self::unix as platform;

#[cfg(not(target_os = "linux"))]
compile_error!("corrente currently only supports Linux (epoll) targets");
