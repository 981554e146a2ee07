use crate::process::ProcessError;

use libc::{signal, sighandler_t, SIGINT};

pub extern "C" fn handle_sigint(_: i32) {
    // Do nothing, let the foreground child handle the signal
}

/// Parks SIGINT on a no-op handler while the shell waits on children, so
/// ctrl-c reaches the foreground process instead of killing the shell.
pub fn defer_sigint_to_child() -> Result<(), ProcessError> {
    unsafe {
        signal(SIGINT, handle_sigint as sighandler_t);
    }
    Ok(())
}
