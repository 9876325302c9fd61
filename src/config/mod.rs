//! Suite file loading and validation.
mod loader;
mod parse;
pub mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use loader::load_suite;
pub(crate) use parse::parse_duration_value;

#[cfg(test)]
pub(crate) use loader::load_suite_file;
