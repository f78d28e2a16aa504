pub mod atomic_file;
pub mod command;
pub mod port_inspector;
pub mod scheduler;
pub mod supervisor;

pub use command::{CommandOutput, CommandRunner, TokioCommandRunner};
pub use port_inspector::SsPortInspector;
pub use scheduler::CronScheduler;
pub use supervisor::SystemdSupervisor;
