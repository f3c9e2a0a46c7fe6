use std::env;

const REMOTE_AGENT_VAR: &str = "NODESHARE_REMOTE_AGENT";

/// Where the process runs, which decides the default console sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Interactive use from a local terminal.
    LocalDev,
    /// Invoked by an orchestrator agent; set `NODESHARE_REMOTE_AGENT=1`.
    RemoteAgent,
}

impl ExecutionContext {
    pub fn detect() -> Self {
        let remote = env::var(REMOTE_AGENT_VAR)
            .map(|value| value.trim() == "1")
            .unwrap_or(false);
        if remote {
            ExecutionContext::RemoteAgent
        } else {
            ExecutionContext::LocalDev
        }
    }

    /// Returns `true` when console sinks should be disabled by default.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::RemoteAgent)
    }
}
