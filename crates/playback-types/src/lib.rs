//! playback-types: pure data types shared by the playback crates.
//!
//! - [`Command`]: a recorded test step, as it appears in a saved suite
//! - [`Step`]: the one thing the tree builder needs from a step (its name)
//! - [`Keyword`] / [`CommandKind`]: control-flow classification of step names

mod command;
mod keyword;

pub use command::{Command, Step};
pub use keyword::{Arm, CommandKind, Keyword, LoopTest, Opener};
