//! Generated project files.

use rayboot::models::ProjectPaths;
use rayboot::scaffold::Scaffold;
use tempfile::TempDir;

#[test]
fn test_cmake_lists_points_at_project_dependencies() {
    let temp = TempDir::new().unwrap();
    let paths = ProjectPaths::new(temp.path());

    let path = Scaffold::new(&paths).write_cmake_lists().unwrap();

    assert_eq!(path, temp.path().join("CMakeLists.txt"));
    let content = std::fs::read_to_string(&path).unwrap();
    let deps = rayboot::utils::normalize_path_for_storage(temp.path().join("dependencies"));

    let include_lines: Vec<&str> = content.lines().filter(|l| l.starts_with("include_directories(")).collect();
    assert_eq!(include_lines.len(), 3);
    assert!(include_lines.iter().all(|l| l.contains(&deps)));

    assert!(content.contains(&format!("{deps}/raylib/lib/raylib.lib winmm)")));
    assert!(content.contains(&format!("{deps}/raylib/lib/libraylib.a m pthread dl rt)")));
}

#[test]
fn test_custom_dependency_dir_is_used() {
    let temp = TempDir::new().unwrap();
    let paths = ProjectPaths::with_dirs(temp.path(), "third_party", "out");

    Scaffold::new(&paths).generate().unwrap();

    let content = std::fs::read_to_string(temp.path().join("CMakeLists.txt")).unwrap();
    assert!(content.contains("third_party/raylib/include"));
    assert!(!content.contains("dependencies/"));
}

#[test]
fn test_scaffold_does_not_touch_other_files() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("game.cpp"), "// mine").unwrap();
    let paths = ProjectPaths::new(temp.path());

    Scaffold::new(&paths).generate().unwrap();

    assert_eq!(std::fs::read_to_string(temp.path().join("game.cpp")).unwrap(), "// mine");
    assert!(!temp.path().join("dependencies").exists());
    assert!(!temp.path().join("build").exists());
}
