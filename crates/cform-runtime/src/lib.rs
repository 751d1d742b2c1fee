#![forbid(unsafe_code)]

//! Runtime: the Model/update/view loop and its test simulator.

pub mod program;
pub mod simulator;

pub use program::{Cmd, EventSource, Model, Program, ProgramConfig};
pub use simulator::ProgramSimulator;
