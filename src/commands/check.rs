//! Check command implementation.
//!
//! Validates system requirements and configuration.

use std::path::Path;
use ususpend::{IgnoreList, ProcFs, ProcessTable};

use crate::config::{validate_effective_config, Config};
use crate::startup_checks::{check_platform, check_proc_access, check_user_privileges};

/// Validates system requirements and configuration.
pub fn command_check(config: &Config, base: &Path) -> anyhow::Result<()> {
    println!("🔍 ususpend - System Check");
    println!("==========================");

    let mut all_ok = true;

    println!("\n🐧 Checking platform...");
    match check_platform() {
        Ok(()) => println!("   ✅ Linux"),
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    println!("\n👤 Checking privileges...");
    if check_user_privileges() {
        println!("   ✅ Running as root");
    } else {
        println!("   ⚠️  Not root - only own processes can be signaled");
    }

    println!("\n📁 Checking process table...");
    let proc_root = config.proc_root_path();
    let table = ProcFs::new(&proc_root);
    match check_proc_access(table.root()) {
        Ok(()) => match table.processes() {
            Ok(entries) => println!(
                "   ✅ {} processes visible under {}",
                entries.len(),
                table.root().display()
            ),
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        },
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(()) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n🚫 Checking ignore list...");
    let ignore_path = config.ignore_file_path(base);
    if ignore_path.exists() {
        match IgnoreList::from_file(&ignore_path) {
            Ok(list) => {
                println!(
                    "   ✅ {} rules loaded from {}",
                    list.len(),
                    ignore_path.display()
                );
                for pattern in list.patterns() {
                    println!("      {}", pattern);
                }
            }
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        }
    } else {
        println!(
            "   ⚠️  {} not found - a default will be created on first run",
            ignore_path.display()
        );
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}
