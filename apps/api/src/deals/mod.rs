// Deal finalization.

pub mod handlers;
pub mod repository;
