//! Test utilities shared by unit and integration tests
//!
//! Available under `cfg(test)` and with the `test-utils` feature, which the
//! integration test target enables through the crate's dev-dependency on itself.
//!
//! - [`init_test_logging`] installs a test-friendly tracing subscriber once
//! - [`tar_gz_bytes`] / [`zip_bytes`] build archive fixtures in memory
//! - [`ArchiveServer`] serves fixtures over plain HTTP on localhost
//! - [`RecordingRunner`] and [`ScriptedConfirm`] stand in for subprocesses and
//!   the interactive prompt

use std::collections::HashMap;
use std::future::Future;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};
use std::thread;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::build::{CommandRunner, CommandSpec, RunStatus};
use crate::prompt::{Confirm, is_affirmative};

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Gzip-compressed tarball containing `files` (path, content).
///
/// Parent directories get their own entries, as release tarballs usually have.
pub fn tar_gz_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut dirs_added = Vec::new();
    for (path, content) in files {
        let parts: Vec<&str> = path.split('/').collect();
        let mut prefix = String::new();
        for component in &parts[..parts.len() - 1] {
            prefix.push_str(component);
            prefix.push('/');
            if !dirs_added.contains(&prefix) {
                let mut header = tar::Header::new_gnu();
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append_data(&mut header, &prefix, std::io::empty()).unwrap();
                dirs_added.push(prefix.clone());
            }
        }

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, content.as_bytes()).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// Zip archive containing `files` (path, content).
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (path, content) in files {
        writer.start_file(*path, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Minimal HTTP/1.1 server on `127.0.0.1` serving fixed bodies by path.
///
/// Unknown paths answer `404`. The accept loop runs on a detached thread for the
/// rest of the test process.
pub struct ArchiveServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ArchiveServer {
    /// Serve `routes` (path such as `/raylib-5.0.tar.gz` to body).
    pub fn start(routes: HashMap<String, Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let mut buf = [0u8; 4096];
                let n = stream.read(&mut buf).unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().unwrap().push(path.clone());

                let (status, body) = match routes.get(&path) {
                    Some(body) => ("200 OK", body.as_slice()),
                    None => ("404 Not Found", b"not found".as_slice()),
                };
                let head = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(body);
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Paths requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// [`CommandRunner`] that records every command and exits with scripted codes.
///
/// Once the script is exhausted every command succeeds. Paths registered with
/// [`RecordingRunner::producing`] are written as empty files when the build step
/// succeeds, so a fake build leaves an executable behind.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    codes: Mutex<Vec<Option<i32>>>,
    commands: Mutex<Vec<CommandSpec>>,
    creates: Mutex<Vec<PathBuf>>,
}

impl RecordingRunner {
    /// Runner that succeeds for every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner answering with `codes` in order.
    pub fn with_codes(codes: &[Option<i32>]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().rev().copied().collect()),
            ..Self::default()
        }
    }

    /// Write an empty file at `path` when the build step (`--build`) succeeds.
    pub fn producing(self, path: impl Into<PathBuf>) -> Self {
        self.creates.lock().unwrap().push(path.into());
        self
    }

    /// Commands run so far.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<RunStatus>> + Send {
        self.commands.lock().unwrap().push(command.clone());
        let code = self.codes.lock().unwrap().pop().unwrap_or(Some(0));

        if command.args.first().is_some_and(|arg| arg == "--build") && code == Some(0) {
            for path in self.creates.lock().unwrap().iter() {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).unwrap();
                }
                std::fs::write(path, "").unwrap();
            }
        }

        async move {
            Ok(RunStatus {
                code,
            })
        }
    }
}

/// [`Confirm`] provider answering from a fixed script.
///
/// Once the script is exhausted every question is answered with an empty line,
/// which declines.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: Mutex<Vec<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut answers: Vec<String> = answers.into_iter().map(Into::into).collect();
        answers.reverse();
        Self {
            answers: Mutex::new(answers),
            asked: Mutex::default(),
        }
    }

    /// Messages shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> impl Future<Output = Result<bool>> + Send {
        self.asked.lock().unwrap().push(message.to_string());
        let answer = self.answers.lock().unwrap().pop().unwrap_or_default();
        async move { Ok(is_affirmative(&answer)) }
    }
}
