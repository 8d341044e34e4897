use super::{TranslationProvider, types::*};
use crate::{config::Translation, error::ConfigError, error::ProviderError};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Runs an external translator once per batch: JSON request on stdin,
/// JSON response on stdout.
pub struct CommandProvider {
    program: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl CommandProvider {
    pub fn new(cfg: &Translation) -> Result<Self, ConfigError> {
        let raw = cfg.command.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingProviderCommand);
        }
        Ok(Self {
            program: expand_tilde(raw),
            args: cfg.args.clone(),
            env: cfg.env.clone(),
            timeout: (cfg.timeout_seconds > 0).then(|| Duration::from_secs(cfg.timeout_seconds)),
        })
    }

    fn run(&self, req: &TranslateIn) -> Result<TranslateOut, ProviderError> {
        debug!(
            "provider run {} target={} segments={} timeout={:?}",
            self.program.display(),
            req.target,
            req.segments.len(),
            self.timeout
        );
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        for (k, v) in &self.env {
            cmd.env(k, v);
        }

        let mut child = cmd.spawn().map_err(|source| ProviderError::Spawn {
            command: self.program.display().to_string(),
            source,
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("provider stdin unavailable"))?;
        let bytes = serde_json::to_vec(req)?;
        // A provider may stall before reading; the timeout must cover the write too.
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            stdin.write_all(&bytes)?;
            stdin.flush()
        });

        let output = match self.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout)?,
            None => child.wait_with_output()?,
        };
        let written = writer
            .join()
            .map_err(|_| std::io::Error::other("provider stdin writer panicked"))?;

        if !output.status.success() {
            return Err(ProviderError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        written?;

        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("provider stderr {}: {}", self.program.display(), stderr.trim());
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl TranslationProvider for CommandProvider {
    fn name(&self) -> &str {
        "command"
    }

    fn translate(
        &self,
        segments: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if segments.is_empty() {
            return Ok(Vec::new());
        }
        let out = self.run(&TranslateIn {
            target: target_language.to_string(),
            segments: segments.to_vec(),
        })?;
        if !out.ok {
            let msg = out
                .error
                .unwrap_or_else(|| "provider returned ok=false".to_string());
            return Err(ProviderError::Rejected(msg));
        }
        Ok(out.translations)
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output, ProviderError> {
    // Drain pipes while waiting so a chatty provider can't block on a full buffer.
    let stdout_reader = child.stdout.take();
    let stderr_reader = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_reader {
            out.read_to_end(&mut buf)?;
        }
        Ok(buf)
    });

    let stderr_thread = std::thread::spawn(move || -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_reader {
            err.read_to_end(&mut buf)?;
        }
        Ok(buf)
    });

    let join = |h: std::thread::JoinHandle<std::io::Result<Vec<u8>>>| -> Result<Vec<u8>, ProviderError> {
        h.join()
            .map_err(|_| std::io::Error::other("provider pipe reader panicked"))?
            .map_err(ProviderError::from)
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            let stdout = join(stdout_thread)?;
            let stderr = join(stderr_thread)?;
            return Ok(Output {
                status,
                stdout,
                stderr,
            });
        }

        if start.elapsed() > timeout {
            warn!("provider process timed out after {:?}", timeout);
            let _ = child.kill();
            child.wait()?;
            let _ = join(stdout_thread);
            let _ = join(stderr_thread);
            return Err(ProviderError::Timeout {
                seconds: timeout.as_secs(),
            });
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
