pub mod campaign;
pub mod contract;
pub mod creator;
pub mod deal;
pub mod negotiation;
pub mod outreach;
