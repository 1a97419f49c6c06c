// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mirrors lines to the local syslog and reads them back.
//!
//! Skipped when there is no syslog socket or no readable log file, which is the normal
//! case in containers.
#![cfg(unix)]

use modlog::{Level, ModuleLogger};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SYSLOG_FILES: [&str; 2] = ["/var/log/syslog", "/var/log/messages"];

fn readable_syslog() -> Option<&'static Path> {
    SYSLOG_FILES
        .iter()
        .map(Path::new)
        .find(|path| std::fs::read(path).is_ok())
}

#[test]
fn syslog_gets_plain_lines_without_debug() {
    let logger = ModuleLogger::new();
    logger.set_output(std::io::sink());
    if let Err(err) = logger.add_syslog_hook() {
        eprintln!("skipping: {err}");
        return;
    }
    let Some(path) = readable_syslog() else {
        eprintln!("skipping: no readable syslog file");
        return;
    };

    // Colors on the primary output must not leak into syslog.
    logger.set_colors(true);
    logger.set_level(Level::Debug);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    let token = format!("{}-{}", std::process::id(), nanos);

    logger.error(format_args!("For syslog testing: Error with no module: {token}"));
    logger.push_module("test_1");
    logger.warn(format_args!("For syslog testing: Warning with test1 module: {token}"));
    logger.debug(format_args!("For syslog testing: Debug with test1 module: {token}"));
    logger.pop_module();

    let error_line = format!(
        "level=error msg=\"For syslog testing: Error with no module: {token}\" module=syslog"
    );
    let warn_line = format!(
        "level=warning msg=\"For syslog testing: Warning with test1 module: {token}\" module=test_1"
    );
    let debug_line = format!("For syslog testing: Debug with test1 module: {token}");

    let mut contents = String::new();
    for _ in 0..20 {
        contents = String::from_utf8_lossy(&std::fs::read(path).unwrap_or_default()).into_owned();
        if contents.contains(&warn_line) {
            break;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    if !contents.contains(&token) {
        eprintln!("skipping: syslog daemon did not write to {}", path.display());
        return;
    }

    assert!(contents.contains(&error_line), "missing {error_line:?}");
    assert!(contents.contains(&warn_line), "missing {warn_line:?}");
    assert!(!contents.contains(&debug_line));
    assert!(!contents.contains("\x1b[31mERRO\x1b[0m"));
}
