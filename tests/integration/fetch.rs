//! Fetching archives from a local HTTP server.

use rayboot::core::BootstrapError;
use rayboot::fetch::{FetchOutcome, Fetcher};
use rayboot::models::Dependency;
use rayboot::test_utils::{ArchiveServer, init_test_logging, tar_gz_bytes, zip_bytes};
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

fn fetcher() -> Fetcher {
    Fetcher::new(Duration::from_secs(30)).unwrap()
}

fn server(routes: &[(&str, Vec<u8>)]) -> ArchiveServer {
    let routes: HashMap<String, Vec<u8>> =
        routes.iter().map(|(path, body)| ((*path).to_string(), body.clone())).collect();
    ArchiveServer::start(routes)
}

#[tokio::test]
async fn test_tar_gz_is_installed_under_library_name() {
    init_test_logging(None);
    let archive = tar_gz_bytes(&[
        ("raylib-5.0_linux_amd64/include/raylib.h", "#define RAYLIB_VERSION \"5.0\""),
        ("raylib-5.0_linux_amd64/lib/libraylib.a", "!<arch>"),
        ("raylib-5.0_linux_amd64/README.md", "# raylib"),
    ]);
    let server = server(&[("/raylib-5.0_linux_amd64.tar.gz", archive)]);
    let temp = TempDir::new().unwrap();
    let deps_dir = temp.path().join("dependencies");

    let deps = [Dependency::new("raylib", server.url("/raylib-5.0_linux_amd64.tar.gz"))];
    let report = fetcher().fetch_all(&deps, &deps_dir).await.unwrap();

    assert!(report.is_success(), "{report:?}");
    assert_eq!(
        report.outcome("raylib"),
        Some(&FetchOutcome::Installed {
            path: deps_dir.join("raylib"),
            renamed: true,
        })
    );
    assert!(deps_dir.join("raylib/include/raylib.h").is_file());
    assert!(deps_dir.join("raylib/lib/libraylib.a").is_file());
    assert!(!deps_dir.join("raylib-5.0_linux_amd64").exists());
    assert!(!deps_dir.join("raylib-5.0_linux_amd64.tar.gz").exists());
    assert_eq!(server.requests(), ["/raylib-5.0_linux_amd64.tar.gz"]);
}

#[tokio::test]
async fn test_zip_is_installed_under_library_name() {
    let archive = zip_bytes(&[
        ("raylib-5.0_win64_msvc16/include/raylib.h", "// header"),
        ("raylib-5.0_win64_msvc16/lib/raylib.lib", "lib"),
    ]);
    let server = server(&[("/raylib-5.0_win64_msvc16.zip", archive)]);
    let temp = TempDir::new().unwrap();

    let deps = [Dependency::new("raylib", server.url("/raylib-5.0_win64_msvc16.zip"))];
    let report = fetcher().fetch_all(&deps, temp.path()).await.unwrap();

    assert!(report.is_success(), "{report:?}");
    assert!(temp.path().join("raylib/lib/raylib.lib").is_file());
    assert!(!temp.path().join("raylib-5.0_win64_msvc16.zip").exists());
}

#[tokio::test]
async fn test_archive_without_single_root_is_not_renamed() {
    let archive = zip_bytes(&[("include/lib.h", "//"), ("lib/lib.a", "a")]);
    let server = server(&[("/flat-1.0.zip", archive)]);
    let temp = TempDir::new().unwrap();

    let deps = [Dependency::new("flat", server.url("/flat-1.0.zip"))];
    let report = fetcher().fetch_all(&deps, temp.path()).await.unwrap();

    assert_eq!(
        report.outcome("flat"),
        Some(&FetchOutcome::Installed {
            path: temp.path().to_path_buf(),
            renamed: false,
        })
    );
    assert!(temp.path().join("include/lib.h").is_file());
    assert!(!temp.path().join("flat").exists());
    assert!(!temp.path().join("flat-1.0.zip").exists());
}

#[tokio::test]
async fn test_existing_library_directory_is_left_alone() {
    let archive = tar_gz_bytes(&[("raylib-5.0/include/raylib.h", "// new")]);
    let server = server(&[("/raylib-5.0.tar.gz", archive)]);
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("raylib/include")).unwrap();
    std::fs::write(temp.path().join("raylib/include/raylib.h"), "// old").unwrap();

    let deps = [Dependency::new("raylib", server.url("/raylib-5.0.tar.gz"))];
    let report = fetcher().fetch_all(&deps, temp.path()).await.unwrap();

    assert!(report.is_success());
    assert_eq!(
        report.outcome("raylib"),
        Some(&FetchOutcome::Installed {
            path: temp.path().join("raylib-5.0"),
            renamed: false,
        })
    );
    assert_eq!(std::fs::read_to_string(temp.path().join("raylib/include/raylib.h")).unwrap(), "// old");
    assert!(temp.path().join("raylib-5.0/include/raylib.h").is_file());
    assert!(!temp.path().join("raylib-5.0.tar.gz").exists());
}

#[tokio::test]
async fn test_http_error_is_recorded_and_next_dependency_fetched() {
    let archive = tar_gz_bytes(&[("extra-1.0/extra.h", "//")]);
    let server = server(&[("/extra-1.0.tar.gz", archive)]);
    let temp = TempDir::new().unwrap();

    let deps = [
        Dependency::new("raylib", server.url("/missing.tar.gz")),
        Dependency::new("extra", server.url("/extra-1.0.tar.gz")),
    ];
    let report = fetcher().fetch_all(&deps, temp.path()).await.unwrap();

    match report.outcome("raylib") {
        Some(FetchOutcome::Failed { reason }) => assert!(reason.contains("404"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(report.outcome("extra").is_some_and(FetchOutcome::is_success));
    assert!(temp.path().join("extra/extra.h").is_file());
    assert!(!temp.path().join("missing.tar.gz").exists());
    assert_eq!(report.failures().count(), 1);
}

#[tokio::test]
async fn test_unsafe_zip_entry_is_rejected() {
    let archive = zip_bytes(&[("../escape.txt", "gotcha")]);
    let server = server(&[("/evil.zip", archive)]);
    let temp = TempDir::new().unwrap();
    let deps_dir = temp.path().join("deps");
    std::fs::create_dir_all(&deps_dir).unwrap();

    let err = fetcher()
        .fetch_one(&Dependency::new("evil", server.url("/evil.zip")), &deps_dir)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BootstrapError>(),
        Some(BootstrapError::UnsafeArchiveEntry { .. })
    ));
    assert!(!temp.path().join("escape.txt").exists());
}

#[tokio::test]
async fn test_corrupt_download_is_extraction_failure() {
    let server = server(&[("/broken.tar.gz", b"definitely not gzip".to_vec())]);
    let temp = TempDir::new().unwrap();

    let err = fetcher()
        .fetch_one(&Dependency::new("broken", server.url("/broken.tar.gz")), temp.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BootstrapError>(),
        Some(BootstrapError::ExtractionFailed { .. })
    ));
}
