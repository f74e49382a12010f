//! Wrapped child command supervision

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use nix::sys::signal;
use nix::unistd::Pid;
use tokio::process::{Child, Command};

use super::app::{EXIT_CANNOT_EXECUTE, EXIT_COMMAND_NOT_FOUND, EXIT_ERROR};
use super::presenter::Presenter;
use super::signals::{ProcessSignal, SignalListener};

/// Map a child's exit status to our own exit code.
/// Death by signal N becomes 128 + N.
pub fn exit_code_of(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        (code & 0xff) as u8
    } else if let Some(sig) = status.signal() {
        ((128 + sig) & 0xff) as u8
    } else {
        EXIT_ERROR
    }
}

fn forward(child: &Child, sig: ProcessSignal, presenter: &Presenter) {
    if let Some(id) = child.id() {
        presenter.debug(&format!("forwarding {:?} to child {}", sig.as_nix(), id));
        let _ = signal::kill(Pid::from_raw(id as i32), sig.as_nix());
    }
}

/// Run `command` to completion, forwarding SIGINT/SIGTERM to it.
///
/// Returns the child's exit code, 127 if the program does not exist and
/// 126 if it could not be started.
pub async fn run_wrapped_command(
    command: &[String],
    signals: &mut SignalListener,
    presenter: &Presenter,
) -> u8 {
    let Some((program, args)) = command.split_first() else {
        return 0;
    };

    let mut child = match Command::new(program).args(args).spawn() {
        Ok(child) => child,
        Err(e) => {
            presenter.error(&format!("failed to run {}: {}", program, e));
            return if e.kind() == std::io::ErrorKind::NotFound {
                EXIT_COMMAND_NOT_FOUND
            } else {
                EXIT_CANNOT_EXECUTE
            };
        }
    };
    presenter.debug(&format!("started {} (pid {:?})", program, child.id()));

    loop {
        tokio::select! {
            status = child.wait() => {
                return match status {
                    Ok(status) => exit_code_of(status),
                    Err(e) => {
                        presenter.error(&format!("failed to wait for {}: {}", program, e));
                        EXIT_ERROR
                    }
                };
            }
            sig = signals.recv() => forward(&child, sig, presenter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_of_normal_exit() {
        assert_eq!(exit_code_of(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code_of(ExitStatus::from_raw(3 << 8)), 3);
    }

    #[test]
    fn exit_code_of_signal_death() {
        // raw wait status 2 = killed by SIGINT
        assert_eq!(exit_code_of(ExitStatus::from_raw(2)), 130);
        assert_eq!(exit_code_of(ExitStatus::from_raw(15)), 143);
    }

    #[tokio::test]
    async fn empty_command_is_success() {
        let mut signals = SignalListener::new().unwrap();
        assert_eq!(
            run_wrapped_command(&[], &mut signals, &Presenter::default()).await,
            0
        );
    }

    #[tokio::test]
    async fn returns_child_exit_code() {
        let mut signals = SignalListener::new().unwrap();
        let command = vec!["sh".to_string(), "-c".to_string(), "exit 7".to_string()];
        assert_eq!(
            run_wrapped_command(&command, &mut signals, &Presenter::default()).await,
            7
        );
    }

    #[tokio::test]
    async fn missing_program_is_127() {
        let mut signals = SignalListener::new().unwrap();
        let command = vec!["clipsync-no-such-program-7f3a".to_string()];
        assert_eq!(
            run_wrapped_command(&command, &mut signals, &Presenter::default()).await,
            127
        );
    }
}
