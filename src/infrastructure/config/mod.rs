//! Configuration file infrastructure module

mod xdg;

pub use xdg::XdgConfigStore;
