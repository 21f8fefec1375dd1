use std::ffi::{c_char, CStr, CString};
use std::io::{self, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{dup2, fork, ForkResult, Pid};
use tracing::debug;

use crate::executor::redirect::RedirectFiles;
use crate::executor::ExecError;

/// A spawned child. The parent's only job is to wait for it.
#[derive(Debug)]
pub struct ChildProcess {
    pid: Pid,
}

impl ChildProcess {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Blocks until the child terminates. A child killed by a signal
    /// reports `128 + signal`.
    pub fn wait(self) -> Result<i32, ExecError> {
        loop {
            match waitpid(self.pid, None) {
                Ok(WaitStatus::Exited(_, code)) => {
                    debug!(pid = %self.pid, code, "child exited");
                    return Ok(code);
                }
                Ok(WaitStatus::Signaled(_, signal, _)) => {
                    debug!(pid = %self.pid, ?signal, "child killed by signal");
                    return Ok(128 + signal as i32);
                }
                Ok(_) | Err(Errno::EINTR) => continue,
                Err(source) => return Err(ExecError::Wait { pid: self.pid, source }),
            }
        }
    }
}

/// Runs `program` in a new process with `argv` as its argument vector and
/// the given files on its standard streams.
pub fn spawn(program: &Path, argv: &[String], stdio: &RedirectFiles) -> Result<ChildProcess, ExecError> {
    let c_program = CString::new(program.as_os_str().as_bytes()).map_err(|_| {
        ExecError::InvalidArgument(format!("{}: path contains a NUL byte", program.display()))
    })?;
    let c_argv = argv
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ExecError::InvalidArgument(format!("argument contains a NUL byte at {}", e.nul_position())))?;
    // NULL-terminated, borrowed from `c_argv`, built before the fork
    let argv_ptrs: Vec<*const c_char> = c_argv
        .iter()
        .map(|arg| arg.as_ptr())
        .chain(std::iter::once(std::ptr::null()))
        .collect();

    let fds = [
        (stdio.stdin.as_ref().map(AsRawFd::as_raw_fd), libc::STDIN_FILENO),
        (stdio.stdout.as_ref().map(AsRawFd::as_raw_fd), libc::STDOUT_FILENO),
        (stdio.stderr.as_ref().map(AsRawFd::as_raw_fd), libc::STDERR_FILENO),
    ];

    // Buffered shell output must not land after the child's
    io::stdout().flush()?;
    io::stderr().flush()?;

    // Nothing is allocated after the fork. The child only calls dup2, execv,
    // write and _exit before it is replaced.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!(pid = %child, program = %program.display(), "spawned child");
            Ok(ChildProcess { pid: child })
        }
        Ok(ForkResult::Child) => exec_child(&c_program, &argv_ptrs, &fds),
        Err(source) => Err(ExecError::Spawn {
            program: program.display().to_string(),
            source,
        }),
    }
}

fn exec_child(program: &CStr, argv: &[*const c_char], fds: &[(Option<RawFd>, RawFd)]) -> ! {
    for &(fd, target) in fds {
        if let Some(fd) = fd {
            if let Err(errno) = dup2(fd, target) {
                child_fail(b"dup2", errno, 1);
            }
        }
    }

    unsafe {
        libc::execv(program.as_ptr(), argv.as_ptr());
    }
    // execv only returns on failure
    let errno = Errno::last();
    let status = if errno == Errno::ENOENT { 127 } else { 126 };
    child_fail(program.to_bytes(), errno, status)
}

fn child_fail(what: &[u8], errno: Errno, status: i32) -> ! {
    let parts: [&[u8]; 5] = [b"tinysh: ", what, b": ", errno.desc().as_bytes(), b"\n"];
    for part in parts {
        unsafe {
            libc::write(libc::STDERR_FILENO, part.as_ptr().cast(), part.len());
        }
    }
    unsafe { libc::_exit(status) }
}
