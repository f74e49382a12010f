//! Log output port interface

/// Port for the mirror's log lines.
///
/// `info` lines always reach the user; `debug` lines only when verbose
/// output was requested.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);

    fn debug(&self, message: &str);
}
