// Outreach: personalised email + voice note per (campaign, creator) pair.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod repository;
