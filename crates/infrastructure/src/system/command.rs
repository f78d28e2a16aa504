use async_trait::async_trait;
use std::io::ErrorKind;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;
use vortexl2_domain::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stderr if present, otherwise stdout.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs external tools. Every adapter talks to the host through this seam.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    fn default_timeout(&self) -> Duration;

    /// Runs to completion. A non-zero exit is not an error here; a missing
    /// binary is `ToolMissing` and an expired timeout is `CommandTimeout`.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, DomainError>;

    /// Starts a process that outlives this call and returns its pid.
    async fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, DomainError>;

    /// Whether `program` resolves to an executable file.
    fn exists(&self, program: &str) -> bool;

    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, DomainError> {
        self.run_with_timeout(program, args, self.default_timeout())
            .await
    }

    /// Like `run`, but a non-zero exit becomes `CommandFailed`.
    async fn run_ok(&self, program: &str, args: &[&str]) -> Result<CommandOutput, DomainError> {
        let output = self.run(program, args).await?;
        if !output.success() {
            return Err(DomainError::CommandFailed {
                command: command_line(program, args),
                stderr: output.diagnostic(),
            });
        }
        Ok(output)
    }
}

pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn spawn_error(program: &str, e: std::io::Error) -> DomainError {
        if e.kind() == ErrorKind::NotFound {
            DomainError::ToolMissing(program.to_string())
        } else {
            DomainError::CommandFailed {
                command: program.to_string(),
                stderr: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    fn default_timeout(&self) -> Duration {
        self.timeout
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, DomainError> {
        debug!(command = %command_line(program, args), "Running command");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Self::spawn_error(program, e))?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| DomainError::CommandTimeout(command_line(program, args)))?
            .map_err(|e| Self::spawn_error(program, e))?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, DomainError> {
        debug!(command = %command_line(program, args), "Spawning detached process");

        // Own process group: the forwarder must survive a Ctrl-C in the menu
        let mut std_command = std::process::Command::new(program);
        std_command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0);

        let child = Command::from(std_command)
            .spawn()
            .map_err(|e| Self::spawn_error(program, e))?;

        child.id().ok_or_else(|| DomainError::CommandFailed {
            command: command_line(program, args),
            stderr: "process exited immediately".to_string(),
        })
    }

    fn exists(&self, program: &str) -> bool {
        if program.contains('/') {
            return Path::new(program).is_file();
        }
        std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
            .unwrap_or(false)
    }
}
