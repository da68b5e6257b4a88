// Creator roster CRUD and AI-ranked search.

pub mod handlers;
pub mod repository;
