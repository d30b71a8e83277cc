pub(crate) mod config;
pub(crate) mod grid;
pub(crate) mod host;
pub(crate) mod mount;
pub(crate) mod renderer;
pub(crate) mod shade;
pub(crate) mod sim;
pub(crate) mod surface;
