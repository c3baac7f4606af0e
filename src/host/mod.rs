//! Host-side collaborators that drive the engine through its pins: a
//! button-pressing driver and a small script language on top of it.

mod driver;
pub mod script;

pub use driver::{plan_path, HostDriver};
pub use script::{parse_script, run_script, ScriptCommand, ScriptLine};
