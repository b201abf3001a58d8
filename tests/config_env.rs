// tests/config_env.rs
use std::env;

use topsis_mailer::config::{AppConfig, EmailBackend, DEFAULT_MAX_UPLOAD_BYTES};

const VARS: &[&str] = &[
    "TOPSIS_MAX_UPLOAD_BYTES",
    "TOPSIS_METRICS",
    "RESEND_API_KEY",
    "RESEND_API_BASE",
    "RESEND_FROM_EMAIL",
    "TOPSIS_FROM_EMAIL",
    "TOPSIS_EMAIL_SUBJECT",
    "SMTP_HOST",
    "SMTP_USER",
    "SMTP_PASS",
];

fn clear() {
    for v in VARS {
        env::remove_var(v);
    }
}

#[serial_test::serial]
#[test]
fn from_env_reads_process_environment() {
    clear();
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(cfg.email.backend, EmailBackend::Disabled);

    env::set_var("SMTP_HOST", "smtp.example.com");
    env::set_var("SMTP_USER", "mailer");
    env::set_var("SMTP_PASS", "secret");
    env::set_var("TOPSIS_FROM_EMAIL", "ranks@example.com");
    env::set_var("TOPSIS_MAX_UPLOAD_BYTES", "1048576");

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.max_upload_bytes, 1_048_576);
    assert_eq!(cfg.email.backend.name(), "smtp");
    assert_eq!(cfg.email.from, "ranks@example.com");

    clear();
}

#[serial_test::serial]
#[test]
fn invalid_limit_fails_loudly() {
    clear();
    env::set_var("TOPSIS_MAX_UPLOAD_BYTES", "-5");
    let err = AppConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("TOPSIS_MAX_UPLOAD_BYTES"));
    clear();
}

#[serial_test::serial]
#[test]
fn app_builds_with_disabled_email() {
    clear();
    let cfg = AppConfig::from_env().unwrap();
    assert!(topsis_mailer::app(cfg).is_ok());
}
