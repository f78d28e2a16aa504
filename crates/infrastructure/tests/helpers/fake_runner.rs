use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use vortexl2_domain::DomainError;
use vortexl2_infrastructure::system::command::command_line;
use vortexl2_infrastructure::system::{CommandOutput, CommandRunner};

type Hook = Box<dyn Fn(&str) + Send + Sync>;

/// Records every command line. Responses are looked up by longest matching
/// prefix; anything unmatched exits 0 with empty output.
pub struct FakeCommandRunner {
    calls: Mutex<Vec<String>>,
    spawned: Mutex<Vec<String>>,
    responses: Mutex<HashMap<String, CommandOutput>>,
    missing: Mutex<HashSet<String>>,
    hooks: Mutex<Vec<(String, Hook)>>,
    next_pid: AtomicU32,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            spawned: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
            missing: Mutex::new(HashSet::new()),
            hooks: Mutex::new(Vec::new()),
            next_pid: AtomicU32::new(5000),
        }
    }

    pub fn respond(&self, prefix: &str, status: i32, stdout: &str, stderr: &str) {
        self.responses.lock().unwrap().insert(
            prefix.to_string(),
            CommandOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
    }

    pub fn set_missing(&self, program: &str) {
        self.missing.lock().unwrap().insert(program.to_string());
    }

    /// Runs `hook` with the command line whenever one starting with `prefix`
    /// is run or spawned.
    pub fn on_command(&self, prefix: &str, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.hooks
            .lock()
            .unwrap()
            .push((prefix.to_string(), Box::new(hook)));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn spawned(&self) -> Vec<String> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.starts_with(prefix))
    }

    fn fire_hooks(&self, line: &str) {
        for (prefix, hook) in self.hooks.lock().unwrap().iter() {
            if line.starts_with(prefix.as_str()) {
                hook(line);
            }
        }
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    fn default_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<CommandOutput, DomainError> {
        if self.missing.lock().unwrap().contains(program) {
            return Err(DomainError::ToolMissing(program.to_string()));
        }

        let line = command_line(program, args);
        self.calls.lock().unwrap().push(line.clone());
        self.fire_hooks(&line);

        let responses = self.responses.lock().unwrap();
        let output = responses
            .iter()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, output)| output.clone())
            .unwrap_or(CommandOutput {
                status: Some(0),
                ..Default::default()
            });
        Ok(output)
    }

    async fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, DomainError> {
        if self.missing.lock().unwrap().contains(program) {
            return Err(DomainError::ToolMissing(program.to_string()));
        }

        let line = command_line(program, args);
        self.spawned.lock().unwrap().push(line.clone());
        self.fire_hooks(&line);
        Ok(self.next_pid.fetch_add(1, Ordering::SeqCst))
    }

    fn exists(&self, program: &str) -> bool {
        !self.missing.lock().unwrap().contains(program)
    }
}
