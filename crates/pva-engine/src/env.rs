//! Service identity, shaped by the deployment environment.
//!
//! The synthesized principal is what the ingest self-filter compares audit
//! users against; if the deployment renames the service account without
//! setting these variables, feedback suppression degrades to the
//! rollback-mode gate alone.

use std::env;

const SERVICE_ACCOUNT_NAME_KEY: &str = "SERVICE_ACCOUNT_NAME";
const SERVICE_ACCOUNT_DEFAULT: &str = "audit-account";
const POD_NAMESPACE_KEY: &str = "POD_NAMESPACE";
const POD_NAMESPACE_DEFAULT: &str = "default";

/// Domain used for synthesized commit emails.
pub const EMAIL_DOMAIN: &str = "audit.example";
/// Author of the bootstrap snapshot.
pub const INIT_AUTHOR: &str = "audit-init";
/// Author of rollback snapshots.
pub const SERVICE_AUTHOR: &str = "audit-manager";
/// Email used for service-authored snapshots.
pub const SERVICE_EMAIL: &str = "system@audit.example";

/// Service account name, from `SERVICE_ACCOUNT_NAME`.
pub fn service_account_name() -> String {
    env::var(SERVICE_ACCOUNT_NAME_KEY).unwrap_or_else(|_| SERVICE_ACCOUNT_DEFAULT.to_string())
}

/// Pod namespace, from `POD_NAMESPACE`.
pub fn pod_namespace() -> String {
    env::var(POD_NAMESPACE_KEY).unwrap_or_else(|_| POD_NAMESPACE_DEFAULT.to_string())
}

/// The full principal the cluster reports for this service's own mutations.
pub fn service_principal() -> String {
    format!(
        "system:serviceaccount:{}:{}",
        pod_namespace(),
        service_account_name()
    )
}

/// Synthesized commit email for an audit event user.
pub fn user_email(username: &str, uid: &str) -> String {
    format!("{username}+{uid}@{EMAIL_DOMAIN}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so everything lives in one
    // test to keep it race-free under the parallel runner.
    #[test]
    fn identity_from_env_with_defaults() {
        env::remove_var(SERVICE_ACCOUNT_NAME_KEY);
        env::remove_var(POD_NAMESPACE_KEY);
        assert_eq!(
            service_principal(),
            "system:serviceaccount:default:audit-account"
        );

        env::set_var(SERVICE_ACCOUNT_NAME_KEY, "auditor");
        env::set_var(POD_NAMESPACE_KEY, "audit-system");
        assert_eq!(
            service_principal(),
            "system:serviceaccount:audit-system:auditor"
        );

        env::remove_var(SERVICE_ACCOUNT_NAME_KEY);
        env::remove_var(POD_NAMESPACE_KEY);
    }

    #[test]
    fn email_synthesis() {
        assert_eq!(user_email("alice", "u1"), "alice+u1@audit.example");
    }
}
