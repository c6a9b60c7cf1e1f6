mod io_pump;
mod live;
mod stack;

pub use io_pump::{LineStream, LineTap};
pub use live::{run_live, CommandResult, RunLiveArgs};
pub use stack::StackRunner;
