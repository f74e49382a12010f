//! Signal handling for the supervisor

use nix::sys::signal::Signal as NixSignal;
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Shutdown signals the supervisor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessSignal {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl ProcessSignal {
    /// Shell-convention exit status for dying from this signal
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupt => 130,
            Self::Terminate => 143,
        }
    }

    /// Signal to forward to a wrapped child
    pub const fn as_nix(&self) -> NixSignal {
        match self {
            Self::Interrupt => NixSignal::SIGINT,
            Self::Terminate => NixSignal::SIGTERM,
        }
    }
}

/// Listens for SIGINT and SIGTERM.
///
/// Once created, these signals no longer terminate the process by default.
pub struct SignalListener {
    sigint: Signal,
    sigterm: Signal,
}

impl SignalListener {
    /// Install SIGINT and SIGTERM handlers
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> ProcessSignal {
        tokio::select! {
            _ = self.sigint.recv() => ProcessSignal::Interrupt,
            _ = self.sigterm.recv() => ProcessSignal::Terminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_exit_code_is_130() {
        assert_eq!(ProcessSignal::Interrupt.exit_code(), 130);
    }

    #[test]
    fn terminate_exit_code_is_143() {
        assert_eq!(ProcessSignal::Terminate.exit_code(), 143);
    }

    #[test]
    fn forwards_matching_signal() {
        assert_eq!(ProcessSignal::Interrupt.as_nix(), NixSignal::SIGINT);
        assert_eq!(ProcessSignal::Terminate.as_nix(), NixSignal::SIGTERM);
    }
}
