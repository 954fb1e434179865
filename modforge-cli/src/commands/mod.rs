//! CLI command implementations

pub mod make;
pub mod remove;
pub mod replay;

pub use make::MakeCommand;
pub use remove::RemoveCommand;
pub use replay::ReplayCommand;
