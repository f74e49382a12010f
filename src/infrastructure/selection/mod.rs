//! X selection infrastructure module

mod xclip;

pub use xclip::{XclipSource, XCLIP_TIMEOUT};
