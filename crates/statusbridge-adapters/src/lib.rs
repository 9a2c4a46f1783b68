pub mod alertmanager;
pub mod cachet;
pub mod observability;
