pub mod confirmation;
pub mod policy;
pub mod repository;
pub mod types;
pub mod validation;
