// Contract generation: agreement text from a finalized deal, rendered to PDF.

pub mod handlers;
pub mod pdf;
pub mod repository;
pub mod template;
