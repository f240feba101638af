//! Full setup pipeline with a local archive server and a recording runner.

use rayboot::build::CommandSpec;
use rayboot::config::BootstrapConfig;
use rayboot::core::BootstrapError;
use rayboot::models::Dependency;
use rayboot::platform::Platform;
use rayboot::test_utils::{ArchiveServer, RecordingRunner, ScriptedConfirm, init_test_logging, tar_gz_bytes};
use rayboot::workflow::{Bootstrapper, SetupOptions};
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

fn raylib_server() -> ArchiveServer {
    let archive = tar_gz_bytes(&[
        ("raylib-5.0_linux_amd64/include/raylib.h", "//"),
        ("raylib-5.0_linux_amd64/include/rlgl.h", "//"),
        ("raylib-5.0_linux_amd64/lib/libraylib.a", "!<arch>"),
        ("raylib-5.0_linux_amd64/README.md", "# raylib"),
        ("raylib-5.0_linux_amd64/LICENSE", "zlib"),
    ]);
    ArchiveServer::start(HashMap::from([("/raylib-5.0_linux_amd64.tar.gz".to_string(), archive)]))
}

fn linux_bootstrapper(
    root: &Path,
    server: &ArchiveServer,
    answers: &[&str],
) -> Bootstrapper<ScriptedConfirm, RecordingRunner> {
    let runner = RecordingRunner::new().producing(Platform::Linux.executable_path(&root.join("build")));
    Bootstrapper::new(
        BootstrapConfig::default(),
        root,
        Platform::Linux,
        ScriptedConfirm::new(answers.iter().copied()),
        runner,
    )
    .with_dependencies(vec![Dependency::new("raylib", server.url("/raylib-5.0_linux_amd64.tar.gz"))])
}

#[tokio::test]
async fn test_setup_end_to_end_on_linux_layout() {
    init_test_logging(None);
    let server = raylib_server();
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let boot = linux_bootstrapper(root, &server, &[]);

    let summary = boot.setup(SetupOptions::default()).await.unwrap();

    // Dependencies
    assert!(summary.fetch.is_success());
    assert!(root.join("dependencies/raylib/include/raylib.h").is_file());
    assert!(root.join("dependencies/raylib/lib/libraylib.a").is_file());
    assert!(!root.join("dependencies/raylib/README.md").exists());
    assert!(!root.join("dependencies/raylib/LICENSE").exists());
    assert_eq!(summary.sanitize.removed_files.len(), 2);

    // Generated files
    let main = std::fs::read_to_string(root.join("main.cpp")).unwrap();
    assert!(main.contains("InitWindow"));
    let cmake = std::fs::read_to_string(root.join("CMakeLists.txt")).unwrap();
    let link_line = cmake
        .lines()
        .find(|l| l.contains("libraylib.a"))
        .unwrap()
        .trim_end_matches(')')
        .to_string();
    assert!(link_line.ends_with("libraylib.a m pthread dl rt"), "{link_line}");
    assert!(root.join(".vscode/c_cpp_properties.json").is_file());

    // Configure, build, run
    let build = root.join("build");
    let executable = build.join("MyExecutable");
    assert_eq!(
        boot.driver().runner().commands(),
        [
            CommandSpec::new("cmake", [".."], &build),
            CommandSpec::new("cmake", ["--build", "."], &build),
            CommandSpec::new(executable.display().to_string(), Vec::<String>::new(), &build),
        ]
    );
    assert_eq!(summary.executable_status.and_then(|s| s.code), Some(0));

    // Nothing asked: there was no dependency directory yet
    assert!(boot.confirm().asked().is_empty());
}

#[tokio::test]
async fn test_setup_replaces_existing_dependencies_after_confirmation() {
    let server = raylib_server();
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    std::fs::create_dir_all(root.join("dependencies/stale")).unwrap();
    let boot = linux_bootstrapper(root, &server, &["Yes\n"]);

    boot.setup(SetupOptions {
        run: false,
        ..SetupOptions::default()
    })
    .await
    .unwrap();

    assert_eq!(boot.confirm().asked().len(), 1);
    assert!(boot.confirm().asked()[0].contains("dependencies"));
    assert!(!root.join("dependencies/stale").exists());
    assert!(root.join("dependencies/raylib").is_dir());
    assert_eq!(boot.driver().runner().commands().len(), 2);
}

#[tokio::test]
async fn test_declined_confirmation_aborts_before_any_change() {
    let server = raylib_server();
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    std::fs::create_dir_all(root.join("dependencies/raylib")).unwrap();
    std::fs::write(root.join("dependencies/raylib/keep"), "x").unwrap();
    let boot = linux_bootstrapper(root, &server, &["y"]);

    let err = boot.setup(SetupOptions::default()).await.unwrap_err();

    let bootstrap = err.downcast_ref::<BootstrapError>().unwrap();
    assert!(matches!(bootstrap, BootstrapError::Aborted { .. }));
    assert_eq!(bootstrap.exit_code(), 1);
    assert!(root.join("dependencies/raylib/keep").is_file());
    assert!(!root.join("main.cpp").exists());
    assert!(server.requests().is_empty());
    assert!(boot.driver().runner().commands().is_empty());
}

#[tokio::test]
async fn test_build_failure_propagates_exit_code() {
    let server = raylib_server();
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let boot = Bootstrapper::new(
        BootstrapConfig::default(),
        root,
        Platform::Linux,
        ScriptedConfirm::new(Vec::<String>::new()),
        RecordingRunner::with_codes(&[Some(0), Some(2)]),
    )
    .with_dependencies(vec![Dependency::new("raylib", server.url("/raylib-5.0_linux_amd64.tar.gz"))]);

    let err = boot.setup(SetupOptions::default()).await.unwrap_err();

    let bootstrap = err.downcast_ref::<BootstrapError>().unwrap();
    assert_eq!(bootstrap.exit_code(), 2);
    // Files are still in place for inspection
    assert!(root.join("CMakeLists.txt").is_file());
    assert_eq!(boot.driver().runner().commands().len(), 2);
}

#[tokio::test]
async fn test_fetch_failure_does_not_stop_setup() {
    let server = ArchiveServer::start(HashMap::new());
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let boot = linux_bootstrapper(root, &server, &[]);

    let summary = boot
        .setup(SetupOptions {
            build: false,
            ..SetupOptions::default()
        })
        .await
        .unwrap();

    assert!(!summary.fetch.is_success());
    assert!(root.join("CMakeLists.txt").is_file());
    assert!(boot.driver().runner().commands().is_empty());
}
