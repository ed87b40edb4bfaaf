//! Check command implementation.
//!
//! Validates the nad installation and the configuration without running any
//! helper script.

use std::fs;
use std::path::{Path, PathBuf};

use nad_component::path_resolver::{nad_binary_path, DEFAULT_NAD_PATH};
use nad_component::{validate_effective_config, Config, SCRIPTS};

/// Validates the installation and configuration.
pub fn command_check(config: &Config) -> anyhow::Result<()> {
    println!("🔍 Node.js Agent Component - Installation Check");
    println!("===============================================");

    let mut all_ok = true;
    let root = config
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NAD_PATH));

    println!("\n📁 Checking install root {}...", root.display());
    if root.is_dir() {
        println!("   ✅ Install root exists");
    } else {
        println!("   ❌ Install root not found");
        all_ok = false;
    }

    let binary = nad_binary_path(&root);
    if binary.exists() {
        println!("   ✅ Agent found at {}", binary.display());
    } else {
        println!("   ❌ Agent not found at {}", binary.display());
        all_ok = false;
    }

    println!("\n📜 Checking helper scripts...");
    for mapping in SCRIPTS {
        let script = mapping.script_path(&root);
        match script_state(&script) {
            ScriptState::Ready => println!("   ✅ {:<5} {}", mapping.prefix, script.display()),
            ScriptState::NotExecutable => {
                println!("   ❌ {:<5} {} is not executable", mapping.prefix, script.display());
                all_ok = false;
            }
            ScriptState::Missing => {
                println!("   ❌ {:<5} {} not found", mapping.prefix, script.display());
                all_ok = false;
            }
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - discovery can run");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review the output above");
        std::process::exit(1);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ScriptState {
    Ready,
    NotExecutable,
    Missing,
}

fn script_state(path: &Path) -> ScriptState {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() && is_executable(&meta) => ScriptState::Ready,
        Ok(_) => ScriptState::NotExecutable,
        Err(_) => ScriptState::Missing,
    }
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    true
}
