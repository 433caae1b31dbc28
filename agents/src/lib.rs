pub mod actions;
pub mod agent;
pub mod assemble;
pub mod compose;
pub mod evaluate;
pub mod planner;
pub mod random;

pub use agent::Agent;
pub use planner::PlannerAgent;
pub use random::RandomAgent;
