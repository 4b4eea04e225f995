//! A long-lived collaborator process spoken to over JSON lines.
//!
//! Each request is one line `{"method": "...", "params": {...}}` on the
//! child's stdin; each response is one line on its stdout, either
//! `{"result": ...}` or `{"error": "message"}`. The first exchange is always
//! `version`.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::collaborator::{
    ParseOutput, SfcCompiler, TemplateOutput, TemplateRequest, TranspileOutput, TranspileRequest,
    Transpiler,
};
use crate::descriptor::{Descriptor, ScriptBlock};

/// Errors talking to a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The command could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        /// The command line.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The command line was empty.
    #[error("empty collaborator command")]
    EmptyCommand,

    /// Reading from or writing to the process failed.
    #[error("collaborator I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A request or response was not valid JSON of the expected shape.
    #[error("malformed collaborator message: {0}")]
    Json(#[from] serde_json::Error),

    /// The process exited or closed its stdout.
    #[error("collaborator process closed the connection")]
    Closed,

    /// The collaborator answered with an error.
    #[error("{method} failed: {message}")]
    Remote {
        /// The request method.
        method: String,
        /// The collaborator's error message.
        message: String,
    },
}

#[derive(Serialize)]
struct Request<'a, P> {
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct Response<R> {
    result: Option<R>,
    error: Option<String>,
}

#[derive(Serialize)]
struct ParseParams<'a> {
    source: &'a str,
    filename: &'a str,
}

#[derive(Serialize)]
struct ScriptParams<'a> {
    descriptor: &'a Descriptor,
    filename: &'a str,
}

struct Channel {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// A collaborator running as a child process.
///
/// Implements both [`SfcCompiler`] and [`Transpiler`]; one process may serve
/// both roles.
pub struct ProcessBridge {
    command: String,
    version: String,
    child: Child,
    channel: Mutex<Channel>,
}

impl ProcessBridge {
    /// Starts `command` in `cwd` and performs the version handshake.
    pub fn spawn(command: &[String], cwd: &Path) -> Result<Self, BridgeError> {
        let (program, args) = command.split_first().ok_or(BridgeError::EmptyCommand)?;
        let command_line = command.join(" ");
        tracing::debug!(command = %command_line, "starting collaborator");

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| BridgeError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(BridgeError::Closed);
        };

        let mut bridge = Self {
            command: command_line,
            version: String::new(),
            child,
            channel: Mutex::new(Channel {
                stdin,
                stdout: BufReader::new(stdout),
            }),
        };
        bridge.version = bridge.call::<_, String>("version", serde_json::Value::Null)?;
        tracing::info!(command = %bridge.command, version = %bridge.version, "collaborator ready");
        Ok(bridge)
    }

    /// The command line this bridge was started with.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Sends one request and waits for its response.
    pub fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, BridgeError> {
        let mut line = serde_json::to_string(&Request { method, params })?;
        line.push('\n');

        let mut channel = self
            .channel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        channel.stdin.write_all(line.as_bytes())?;
        channel.stdin.flush()?;

        let mut reply = String::new();
        if channel.stdout.read_line(&mut reply)? == 0 {
            return Err(BridgeError::Closed);
        }
        drop(channel);

        let response: Response<R> = serde_json::from_str(reply.trim_end())?;
        match (response.result, response.error) {
            (_, Some(message)) => Err(BridgeError::Remote {
                method: method.to_string(),
                message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Ok(serde_json::from_value(serde_json::Value::Null)?),
        }
    }
}

impl Drop for ProcessBridge {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl SfcCompiler for ProcessBridge {
    fn version(&self) -> &str {
        &self.version
    }

    fn parse(&self, source: &str, filename: &str) -> Result<ParseOutput, BridgeError> {
        self.call("parse", ParseParams { source, filename })
    }

    fn compile_script(
        &self,
        descriptor: &Descriptor,
        filename: &str,
    ) -> Result<Option<ScriptBlock>, BridgeError> {
        self.call(
            "compileScript",
            ScriptParams {
                descriptor,
                filename,
            },
        )
    }

    fn compile_template(&self, request: &TemplateRequest) -> Result<TemplateOutput, BridgeError> {
        self.call("compileTemplate", request)
    }
}

impl Transpiler for ProcessBridge {
    fn transpile(&self, request: &TranspileRequest) -> Result<TranspileOutput, BridgeError> {
        self.call("transpile", request)
    }
}
