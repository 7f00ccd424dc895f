pub mod bridge;
pub mod python;

pub use bridge::{detect_host, ExecutionMode, ExecutionOutput, NoHost, ScriptHost};
pub use python::PythonHost;
