pub mod clock;
pub mod input;
pub mod machine;
pub mod orchestrator;
pub mod visibility;
