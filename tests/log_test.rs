// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives the process-wide logger the way an application would.
//!
//! Lines logged from this file with nothing pushed are tagged `module=log_test`.

use modlog::{InMemoryOutput, Level};
use std::sync::{Mutex, MutexGuard, PoisonError};

static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

fn setup_logging() -> (MutexGuard<'static, ()>, InMemoryOutput) {
    let guard = TEST_LOGGER_GUARD
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    modlog::reset();
    let output = InMemoryOutput::new();
    modlog::set_output(output.clone());
    modlog::set_colors(false);
    modlog::set_timestamps(false);
    modlog::set_level(Level::Debug);
    (guard, output)
}

fn log_every_variant() {
    modlog::print("Print");
    modlog::print(format_args!("{} : {}", "Printf", "Printf"));
    modlog::println(&[&"Println"]);
    modlog::debug("Debug");
    modlog::debug!("{} : {}", "Debugf", "Debugf");
    modlog::debugln(&[&"Debugln"]);
    modlog::info("Info");
    modlog::info!("{} : {}", "Infof", "Infof");
    modlog::infoln(&[&"Infoln"]);
    modlog::warn("Warn");
    modlog::warn!("{} : {}", "Warnf", "Warnf");
    modlog::warnln(&[&"Warnln"]);
    modlog::warning("Warning");
    modlog::warning!("{} : {}", "Warningf", "Warningf");
    modlog::warningln(&[&"Warningln"]);
    modlog::error("Error");
    modlog::error!("{} : {}", "Errorf", "Errorf");
    modlog::errorln(&[&"Errorln"]);
    let _ = modlog::panic("Panic");
    let _ = modlog::log_panic!("{} : {}", "Panicf", "Panicf");
    let _ = modlog::panicln(&[&"Panicln"]);

    let log = modlog::global();
    log.print("Print");
    log.print(format_args!("{} : {}", "Printf", "Printf"));
    log.println(&[&"Println"]);
    log.debug("Debug");
    modlog::debug!(log => "{} : {}", "Debugf", "Debugf");
    log.debugln(&[&"Debugln"]);
    log.info("Info");
    modlog::info!(log => "{} : {}", "Infof", "Infof");
    log.infoln(&[&"Infoln"]);
    log.warn("Warn");
    modlog::warn!(log => "{} : {}", "Warnf", "Warnf");
    log.warnln(&[&"Warnln"]);
    log.warning("Warning");
    modlog::warning!(log => "{} : {}", "Warningf", "Warningf");
    log.warningln(&[&"Warningln"]);
    log.error("Error");
    modlog::error!(log => "{} : {}", "Errorf", "Errorf");
    log.errorln(&[&"Errorln"]);
    let _ = log.panic("Panic");
    let _ = modlog::log_panic!(log => "{} : {}", "Panicf", "Panicf");
    let _ = log.panicln(&[&"Panicln"]);
}

fn expected_lines(module: &str) -> String {
    let block = [
        ("info", "Print"),
        ("info", "\"Printf : Printf\""),
        ("info", "Println"),
        ("debug", "Debug"),
        ("debug", "\"Debugf : Debugf\""),
        ("debug", "Debugln"),
        ("info", "Info"),
        ("info", "\"Infof : Infof\""),
        ("info", "Infoln"),
        ("warning", "Warn"),
        ("warning", "\"Warnf : Warnf\""),
        ("warning", "Warnln"),
        ("warning", "Warning"),
        ("warning", "\"Warningf : Warningf\""),
        ("warning", "Warningln"),
        ("error", "Error"),
        ("error", "\"Errorf : Errorf\""),
        ("error", "Errorln"),
        ("panic", "Panic"),
        ("panic", "\"Panicf : Panicf\""),
        ("panic", "Panicln"),
    ]
    .iter()
    .map(|(level, msg)| format!("level={level} msg={msg} module={module} \n"))
    .collect::<String>();
    block.repeat(2)
}

fn check_logging(module: &str, output: &InMemoryOutput) {
    log_every_variant();
    assert_eq!(output.drain_logs(), expected_lines(module));
}

#[test]
fn logging() {
    let (_guard, output) = setup_logging();
    check_logging("log_test", &output);
    modlog::reset();
}

#[test]
fn modules() {
    let (_guard, output) = setup_logging();
    modlog::push_module("test_1");
    check_logging("test_1", &output);
    modlog::push_module("test_2");
    check_logging("test_2", &output);
    modlog::pop_module();
    check_logging("test_1", &output);
    modlog::pop_module();
    check_logging("log_test", &output);
    modlog::reset();
}

#[test]
fn scoped_module() {
    let (_guard, output) = setup_logging();
    {
        let _scope = modlog::enter_module("test_1");
        modlog::info("inside");
    }
    modlog::info("outside");
    assert_eq!(
        output.drain_logs(),
        "level=info msg=inside module=test_1 \nlevel=info msg=outside module=log_test \n"
    );
    modlog::reset();
}

#[test]
fn module_filter() {
    let (_guard, output) = setup_logging();

    modlog::set_module_filter(["test"]);
    modlog::debug("Should not show");
    modlog::set_module_filter(["log_test"]);
    modlog::debug("Should show");
    modlog::set_module_filter(["test", "log_test"]);
    modlog::debug("Should also show");
    modlog::push_module("test");
    modlog::set_module_filter(["test", "log_test"]);
    modlog::debug("Should show as well");
    modlog::push_module("test2");
    modlog::debug("Should not show again");
    modlog::pop_module();
    modlog::debug("Should show after module reappeared");
    modlog::pop_module();
    modlog::debug("Should show after file reappeared");

    assert_eq!(
        output.drain_logs(),
        "level=debug msg=\"Should show\" module=log_test \n\
         level=debug msg=\"Should also show\" module=log_test \n\
         level=debug msg=\"Should show as well\" module=test \n\
         level=debug msg=\"Should show after module reappeared\" module=test \n\
         level=debug msg=\"Should show after file reappeared\" module=log_test \n"
    );
    modlog::reset();
}

#[test]
fn log_levels() {
    let (_guard, output) = setup_logging();

    modlog::set_level(Level::Debug);
    modlog::debug("Debug log level should show");
    modlog::set_level(Level::Info);
    modlog::debug("Debug log level should not show");
    modlog::info("Info log level should show");
    modlog::set_level(Level::Warning);
    modlog::debug("Debug log level should not show");
    modlog::info("Info log level should not show");
    modlog::debug("Debug log level should not show");
    modlog::warn("Warn log level should show");

    assert_eq!(
        output.drain_logs(),
        "level=debug msg=\"Debug log level should show\" module=log_test \n\
         level=info msg=\"Info log level should show\" module=log_test \n\
         level=warning msg=\"Warn log level should show\" module=log_test \n"
    );
    modlog::reset();
}

#[test]
fn unbalanced_pop() {
    let (_guard, output) = setup_logging();
    assert_eq!(modlog::pop_module(), None);
    modlog::info("still here");
    assert_eq!(
        output.drain_logs(),
        "level=info msg=\"still here\" module=log_test \n"
    );
    modlog::reset();
}

#[test]
fn colored_output() {
    let (_guard, output) = setup_logging();
    modlog::set_colors(true);
    modlog::warn("Warn");
    modlog::set_timestamps(true);
    modlog::error("Error");

    let written = output.drain_logs();
    let mut lines = written.lines();
    let warn = lines.next().unwrap_or_default();
    assert!(warn.starts_with("\x1b[33mWARN\x1b[0m Warn"), "got {warn:?}");
    assert!(warn.ends_with(" \x1b[33mmodule\x1b[0m=log_test"), "got {warn:?}");
    let error = lines.next().unwrap_or_default();
    assert!(error.starts_with("\x1b[31mERRO\x1b[0m["), "got {error:?}");
    assert!(error.contains("] Error"), "got {error:?}");
    modlog::reset();
}
