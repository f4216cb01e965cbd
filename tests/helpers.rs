//! Shared test utilities for m5dist tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use m5dist::config::Config;
use m5dist::context::ExportContext;

/// Environment name used across the integration tests.
pub const TEST_ENV: &str = "m5stick-imupointer";

/// Test environment with a mock PlatformIO project and package tree.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Mock project root (dist/ is created under here)
    pub project_dir: PathBuf,
    /// Mock build output directory (.pio/build/<env>)
    pub build_dir: PathBuf,
    /// Mock PlatformIO core dir (packages/ lives under here)
    pub core_dir: PathBuf,
    /// Stub interpreter standing in for `python -m esptool`
    pub python: PathBuf,
    /// File the stub records its argv into, one argument per line
    pub merge_args_file: PathBuf,
}

impl TestEnv {
    /// Create a fully-populated test environment: build outputs, framework
    /// package with the boot-selector stub, and a merge stub that records
    /// its argv and fabricates the output image.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let project_dir = base.join("project");
        let build_dir = project_dir.join(".pio/build").join(TEST_ENV);
        let core_dir = base.join("pio-core");
        let merge_args_file = base.join("merge-args.txt");

        fs::create_dir_all(&build_dir).expect("Failed to create build dir");
        fs::write(build_dir.join("firmware.bin"), b"\xe9APP-IMAGE-BYTES")
            .expect("Failed to create firmware.bin");
        fs::write(build_dir.join("bootloader.bin"), b"\xe9BOOTLOADER")
            .expect("Failed to create bootloader.bin");
        fs::write(build_dir.join("partitions.bin"), b"\xaa\x50PARTS")
            .expect("Failed to create partitions.bin");

        let package_dir = core_dir.join("packages/framework-arduinoespressif32");
        fs::create_dir_all(package_dir.join("tools/partitions"))
            .expect("Failed to create package dir");
        fs::write(
            package_dir.join("tools/partitions/boot_app0.bin"),
            b"\xe9BOOTAPP0",
        )
        .expect("Failed to create boot_app0.bin");
        fs::write(
            package_dir.join("package.json"),
            r#"{"name": "framework-arduinoespressif32", "version": "3.20017.0"}"#,
        )
        .expect("Failed to create package.json");

        let python = base.join("bin/python3");
        write_merge_stub(&python, &merge_args_file);

        Self {
            _temp_dir: temp_dir,
            project_dir,
            build_dir,
            core_dir,
            python,
            merge_args_file,
        }
    }

    /// Create the export context for testing.
    pub fn export_context(&self) -> ExportContext {
        let config = Config {
            project_dir: self.project_dir.clone(),
            environment: Some(TEST_ENV.to_string()),
            build_dir: None,
            core_dir: self.core_dir.clone(),
            python: self.python.to_string_lossy().into_owned(),
        };
        ExportContext::from_config(&config).expect("Failed to build export context")
    }

    /// Replace the merge stub with one that fails without producing output.
    pub fn break_merge_tool(&self) {
        write_script(
            &self.python,
            &format!(
                "#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\n\
                 echo 'A fatal error occurred: flash image overlap' >&2\nexit 2\n",
                self.merge_args_file.display()
            ),
        );
    }

    /// Argv the merge stub was invoked with, one element per recorded line.
    /// None if the stub never ran.
    pub fn recorded_merge_args(&self) -> Option<Vec<String>> {
        let content = fs::read_to_string(&self.merge_args_file).ok()?;
        Some(content.lines().map(|l| l.to_string()).collect())
    }
}

/// Write the default merge stub: records argv, then creates the file named
/// after `-o` so the export can continue past the merge stage.
fn write_merge_stub(path: &Path, args_file: &Path) {
    write_script(
        path,
        &format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\n\
             out=\"\"\nprev=\"\"\nfor a in \"$@\"; do\n\
             \x20 if [ \"$prev\" = \"-o\" ]; then out=\"$a\"; fi\n\
             \x20 prev=\"$a\"\ndone\n\
             if [ -n \"$out\" ]; then printf 'MERGED-IMAGE' > \"$out\"; fi\n",
            args_file.display()
        ),
    );
}

/// Write an executable script file.
fn write_script(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create script parent dir");
    }
    fs::write(path, content).expect("Failed to write script");

    let mut perms = fs::metadata(path)
        .expect("Failed to get script metadata")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to set script permissions");
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "Expected file to exist: {}", path.display());
}

/// Assert that a file does not exist.
pub fn assert_file_absent(path: &Path) {
    assert!(
        !path.exists(),
        "Expected file to be absent: {}",
        path.display()
    );
}
