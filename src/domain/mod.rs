// Domain layer - Core planning logic

pub mod errors;
pub mod model;
pub mod rules;
