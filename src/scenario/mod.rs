pub mod context;
pub mod orchestrator;
pub mod step;
pub mod steps;
