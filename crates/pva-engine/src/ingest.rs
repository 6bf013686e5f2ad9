//! Audit ingest: one store mutation plus one snapshot per surviving event.

use pva_resource::Resource;
use pva_store::SnapshotStore;

use crate::env;
use crate::error::{EngineError, EngineResult};
use crate::event::{parse_event_list, Event};
use crate::repo::AuditRepo;

impl AuditRepo {
    /// Ingest one audit batch.
    ///
    /// Events are applied in list order. An event is skipped when its stage
    /// is not `ResponseComplete`, its response reports failure, or its user
    /// is this service's own principal (feedback suppression). The first
    /// surviving event during rollback mode aborts the whole batch; the
    /// first failing event aborts the rest of the batch while keeping the
    /// snapshots already recorded.
    pub fn handle_event_list(&self, body: &[u8]) -> EngineResult<()> {
        let mut store = self.lock_store();
        let list = parse_event_list(body)?;
        for event in &list.items {
            if event.stage != "ResponseComplete"
                || event.response_failed()
                || event.user.username == self.service_account()
            {
                tracing::debug!(
                    verb = %event.verb,
                    user = %event.user.username,
                    "audit event skipped (stage, failed response, or self-originated)"
                );
                continue;
            }
            if store.rollback_mode() {
                return Err(EngineError::RollbackInProgress);
            }
            self.apply_event(&mut store, event)?;
        }
        Ok(())
    }

    fn apply_event(&self, store: &mut SnapshotStore, event: &Event) -> EngineResult<()> {
        let user = event.user.username.as_str();
        let email = env::user_email(user, &event.user.uid);
        let suffix = event.message_suffix()?;
        let path = event.path()?;
        match event.verb.as_str() {
            "create" => {
                self.write_response_object(store, event, &path)?;
                Self::add_and_commit(store, user, &email, &format!("Created {suffix}"))?;
                tracing::info!(path = %path, user, "created resource");
            }
            "patch" => {
                self.write_response_object(store, event, &path)?;
                Self::add_and_commit(store, user, &email, &format!("Updated {suffix}"))?;
                tracing::info!(path = %path, user, "updated resource");
            }
            "delete" => {
                store.remove(&path)?;
                Self::add_and_commit(store, user, &email, &format!("Deleted {suffix}"))?;
                tracing::info!(path = %path, user, "deleted resource");
            }
            other => return Err(EngineError::UnsupportedVerb(other.to_string())),
        }
        Ok(())
    }

    /// Serialize the event's `responseObject` to its canonical path.
    fn write_response_object(
        &self,
        store: &mut SnapshotStore,
        event: &Event,
        path: &str,
    ) -> EngineResult<()> {
        let value = event
            .response_object
            .clone()
            .ok_or_else(|| EngineError::MalformedEvent("missing responseObject".to_string()))?;
        let mut resource = Resource::from_value(value)?;
        resource.clear_server_fields();
        let yaml = resource.to_canonical_yaml()?;
        store.write(path, yaml.as_bytes())?;
        Ok(())
    }
}
