//! Binary behavior: flags, exit codes and user-facing output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rayboot() -> Command {
    let mut cmd = Command::cargo_bin("rayboot").unwrap();
    cmd.env("RAYBOOT_NO_PROGRESS", "1").env_remove("RAYBOOT_BUILD_TOOL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    rayboot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("scaffold"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("platform"));
}

#[test]
fn test_unknown_command_fails() {
    rayboot().arg("install").assert().failure();
}

#[cfg(any(target_os = "linux", target_os = "windows"))]
mod supported {
    use super::*;

    #[test]
    fn test_platform_prints_dependency_table() {
        let expected = if cfg!(windows) {
            "raylib-5.0_win64_msvc16.zip"
        } else {
            "raylib-5.0_linux_amd64.tar.gz"
        };
        rayboot()
            .arg("platform")
            .assert()
            .success()
            .stdout(predicate::str::contains("Platform:"))
            .stdout(predicate::str::contains(expected))
            .stdout(predicate::str::contains("imgui").not());
    }

    #[test]
    fn test_platform_with_imgui() {
        rayboot()
            .args(["platform", "--with-imgui"])
            .assert()
            .success()
            .stdout(predicate::str::contains("https://github.com/ocornut/imgui.git"))
            .stdout(predicate::str::contains("https://github.com/raylib-extras/rlImGui.git"));
    }

    #[test]
    fn test_scaffold_writes_files_into_project() {
        let temp = TempDir::new().unwrap();

        rayboot()
            .arg("scaffold")
            .arg("--project")
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("CMakeLists.txt"));

        assert!(temp.path().join("CMakeLists.txt").is_file());
        assert!(temp.path().join("main.cpp").is_file());
        assert!(temp.path().join(".vscode/c_cpp_properties.json").is_file());
        assert!(!temp.path().join("dependencies").exists());
    }

    #[test]
    fn test_quiet_hides_status_lines() {
        let temp = TempDir::new().unwrap();

        rayboot()
            .args(["scaffold", "--quiet", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        assert!(temp.path().join("CMakeLists.txt").is_file());
    }

    #[test]
    fn test_quiet_still_reports_errors() {
        let temp = TempDir::new().unwrap();
        rayboot()
            .current_dir(temp.path())
            .env("RAYBOOT_BUILD_TOOL", "rayboot-missing-build-tool")
            .args(["-q", "build", "--no-run"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("rayboot-missing-build-tool"));
    }

    #[test]
    fn test_setup_piped_decline_aborts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dependencies/raylib")).unwrap();

        rayboot()
            .current_dir(temp.path())
            .arg("setup")
            .write_stdin("y\n")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Do you want to proceed?"))
            .stderr(predicate::str::contains("Aborted"));

        assert!(temp.path().join("dependencies/raylib").is_dir());
        assert!(!temp.path().join("main.cpp").exists());
    }

    #[test]
    fn test_setup_closed_stdin_aborts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dependencies/raylib")).unwrap();

        rayboot().current_dir(temp.path()).arg("setup").write_stdin("").assert().code(1);

        assert!(temp.path().join("dependencies/raylib").is_dir());
    }

    #[test]
    fn test_clean_reads_one_piped_answer_per_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dependencies/raylib")).unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();

        rayboot()
            .current_dir(temp.path())
            .arg("clean")
            .write_stdin("yes\nYES\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Clean complete"));

        assert!(!temp.path().join("dependencies").exists());
        assert!(!temp.path().join("build").exists());
    }

    #[test]
    fn test_clean_second_answer_declines() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dependencies/raylib")).unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();

        rayboot()
            .current_dir(temp.path())
            .arg("clean")
            .write_stdin("yes\n yes\n")
            .assert()
            .code(1);

        assert!(!temp.path().join("dependencies").exists());
        assert!(temp.path().join("build").is_dir());
    }

    #[test]
    fn test_clean_with_nothing_to_clean() {
        let temp = TempDir::new().unwrap();
        rayboot()
            .args(["clean", "--yes", "--project"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to clean"));
    }

    #[test]
    fn test_clean_yes_removes_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dependencies/raylib")).unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        fs::write(temp.path().join("main.cpp"), "int main() {}").unwrap();

        rayboot().current_dir(temp.path()).args(["clean", "-y"]).assert().success();

        assert!(!temp.path().join("dependencies").exists());
        assert!(!temp.path().join("build").exists());
        assert!(temp.path().join("main.cpp").exists());
    }

    #[test]
    fn test_missing_build_tool_exits_one() {
        let temp = TempDir::new().unwrap();
        rayboot()
            .current_dir(temp.path())
            .env("RAYBOOT_BUILD_TOOL", "rayboot-missing-build-tool")
            .args(["build", "--no-run"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("rayboot-missing-build-tool"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("rayboot.toml"), "build_dri = \"out\"\n").unwrap();

        rayboot()
            .current_dir(temp.path())
            .arg("scaffold")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration error"));

        assert!(!temp.path().join("main.cpp").exists());
    }

    #[test]
    fn test_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("ci.toml");
        fs::write(&config, "dependencies_dir = \"vendor\"\n").unwrap();

        rayboot()
            .current_dir(temp.path())
            .arg("--config")
            .arg(&config)
            .arg("scaffold")
            .assert()
            .success();

        let cmake = fs::read_to_string(temp.path().join("CMakeLists.txt")).unwrap();
        assert!(cmake.contains("vendor/raylib/include"));
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_build_tool_exit_code_is_propagated() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("fake-cmake");
        fs::write(&tool, "#!/bin/sh\nexit 7\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        rayboot()
            .current_dir(temp.path())
            .env("RAYBOOT_BUILD_TOOL", &tool)
            .arg("build")
            .assert()
            .code(7)
            .stderr(predicate::str::contains("configure step failed with exit code 7"));

        assert!(temp.path().join("build").is_dir());
    }

    #[test]
    fn test_successful_build_runs_executable() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("fake-cmake");
        // `--build` drops an executable that prints a marker
        fs::write(
            &tool,
            "#!/bin/sh\nif [ \"$1\" = \"--build\" ]; then\n  printf '#!/bin/sh\\necho window-opened\\n' > MyExecutable\n  chmod +x MyExecutable\nfi\n",
        )
        .unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        rayboot()
            .current_dir(temp.path())
            .env("RAYBOOT_BUILD_TOOL", &tool)
            .arg("build")
            .assert()
            .success()
            .stdout(predicate::str::contains("window-opened"));
    }
}
