//! Transport seam between the engine and the remote session layer.
//!
//! The engine never opens connections itself: an already-resolved session
//! handle is injected per engine instance, and command execution is the
//! only side-effecting operation in the crate. Concrete implementations
//! (SSH, telnet, lab simulators) live with the caller.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::TransportError;

/// Raw result of one remote command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful execution with empty stderr.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// An execution whose only output went to stderr.
    pub fn err(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn has_stderr(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Remote command execution capability.
///
/// The timeout is best-effort: implementations should abort the command
/// when it elapses, and the engine additionally bounds the await on its
/// side. Implementations must not retry on their own.
#[async_trait]
pub trait Transport: Send {
    async fn execute(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> Result<CommandOutput, TransportError>;
}

/// Scripted in-memory transport replaying canned outputs.
///
/// Commands without a scripted reply answer like a real device rejecting
/// unknown syntax: empty stdout plus an error on stderr. Used by the
/// engine tests and usable by callers as an offline stand-in.
#[derive(Debug, Default)]
pub struct StaticTransport {
    replies: IndexMap<String, CommandOutput>,
    timeouts: Vec<String>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a stdout reply for an exact command string.
    pub fn with_response(mut self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.replies.insert(command.into(), CommandOutput::ok(stdout));
        self
    }

    /// Script a reply carrying stderr for an exact command string.
    pub fn with_stderr(mut self, command: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.replies.insert(command.into(), CommandOutput::err(stderr));
        self
    }

    /// Script a command that never completes within its timeout.
    pub fn with_timeout(mut self, command: impl Into<String>) -> Self {
        self.timeouts.push(command.into());
        self
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn execute(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> Result<CommandOutput, TransportError> {
        if self.timeouts.iter().any(|c| c == command) {
            return Err(TransportError::Timeout(timeout));
        }
        Ok(self
            .replies
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandOutput::err(format!("% Unrecognized command: {command}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replies() {
        tokio_test::block_on(async {
            let mut transport = StaticTransport::new()
                .with_response("show version", "Cisco IOS Software")
                .with_stderr("bad", "syntax error");

            let out = transport
                .execute("show version", Duration::from_secs(1))
                .await
                .unwrap();
            assert_eq!(out.stdout, "Cisco IOS Software");
            assert!(!out.has_stderr());

            let out = transport.execute("bad", Duration::from_secs(1)).await.unwrap();
            assert!(out.has_stderr());
        });
    }

    #[tokio::test]
    async fn test_unknown_command_answers_on_stderr() {
        let mut transport = StaticTransport::new();
        let out = transport
            .execute("display version", Duration::from_secs(1))
            .await
            .unwrap();
        assert!(out.stdout.is_empty());
        assert!(out.has_stderr());
    }

    #[tokio::test]
    async fn test_scripted_timeout() {
        let mut transport = StaticTransport::new().with_timeout("traceroute 10.0.0.1");
        let err = transport
            .execute("traceroute 10.0.0.1", Duration::from_secs(30))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)));
    }
}
