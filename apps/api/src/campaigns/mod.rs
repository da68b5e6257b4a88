// Campaign CRUD and AI brief enhancement.

pub mod brief;
pub mod handlers;
pub mod prompts;
pub mod repository;
