pub mod dispatcher;
pub mod error;
pub mod resolver;
pub mod store;
pub mod tracker;

#[cfg(test)]
mod mocks;
