pub mod alert;
pub mod component;
pub mod error;
pub mod events;
pub mod ids;
pub mod incident;
