//! Follow-up actions for a selected row

use crate::context::InfoToken;
use std::io;

/// What selecting a row leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Open the entity and stop
    OpenAction(String),
    /// List the contents of the container
    Narrow(String),
}

/// Decide the follow-up for a token; only the kind matters
pub fn resolve(token: &InfoToken) -> Decision {
    if token.kind.is_container() {
        Decision::Narrow(token.identifier.clone())
    } else {
        Decision::OpenAction(token.identifier.clone())
    }
}

/// Errors starting an open action
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("can't fork: {0}")]
    Fork(#[source] io::Error),
}

/// Hands an entity to the desktop environment
pub trait Opener {
    /// Fire and forget: only failure to start the action is reported
    fn open(&self, identifier: &str) -> Result<(), OpenError>;
}

impl<T: Opener + ?Sized> Opener for &T {
    fn open(&self, identifier: &str) -> Result<(), OpenError> {
        (**self).open(identifier)
    }
}

/// Opens entities with the desktop's default handler
///
/// rofi waits for our stdout to close before it goes away, so the handler
/// runs in a detached grandchild with its standard streams on `/dev/null`.
pub struct DesktopOpener;

impl Opener for DesktopOpener {
    fn open(&self, identifier: &str) -> Result<(), OpenError> {
        match unsafe { libc::fork() } {
            -1 => Err(OpenError::Fork(io::Error::last_os_error())),
            0 => {
                // Child: new session, then fork again so the handler can
                // never reacquire a controlling terminal
                if unsafe { libc::setsid() } == -1 {
                    unsafe { libc::_exit(1) };
                }

                match unsafe { libc::fork() } {
                    -1 => unsafe { libc::_exit(1) },
                    0 => {
                        redirect_stdio_to_null();
                        let status = match opener::open(identifier) {
                            Ok(()) => 0,
                            Err(_) => 1,
                        };
                        unsafe { libc::_exit(status) }
                    }
                    _ => unsafe { libc::_exit(0) },
                }
            }
            pid => {
                // Reap the intermediate child; the grandchild is reparented
                let mut status: libc::c_int = 0;
                unsafe {
                    libc::waitpid(pid, &mut status, 0);
                }
                tracing::debug!(identifier, "open handed to desktop");
                Ok(())
            }
        }
    }
}

fn redirect_stdio_to_null() {
    unsafe {
        let null = libc::open(c"/dev/null".as_ptr(), libc::O_RDWR);
        if null != -1 {
            libc::dup2(null, 0);
            libc::dup2(null, 1);
            libc::dup2(null, 2);
            if null > 2 {
                libc::close(null);
            }
        }
    }
}
