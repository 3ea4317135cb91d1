//! Configuration loading and resolution.
//!
//! `load` merges default config files, extra `--config` files, `MULTISEL__*`
//! environment variables and CLI flags, reads the option lists and returns a
//! validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
#[cfg(test)]
pub(crate) use resolved::fixture;
