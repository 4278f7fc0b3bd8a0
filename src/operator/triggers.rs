//! Form-submit trigger registration.
//!
//! A [`TriggerRegistry`] records which handler receives which event for
//! each workbook. [`install_form_submit_trigger`] is idempotent: it
//! removes every earlier `form_submit` registration for the workbook and
//! creates exactly one new one. The HTTP adapter consults the same
//! registry before routing an event.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::notify::{Buttons, Notifier};
use crate::error::SheethookError;

/// Handler name the form-submit trigger points at.
pub const FORM_SUBMIT_HANDLER: &str = "form_submit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    FormSubmit,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    pub spreadsheet_id: String,
    pub handler: String,
    pub event: TriggerEvent,
}

impl Trigger {
    fn is_form_submit_handler(&self) -> bool {
        self.event == TriggerEvent::FormSubmit && self.handler == FORM_SUBMIT_HANDLER
    }
}

#[async_trait]
pub trait TriggerRegistry: Send + Sync {
    async fn list(&self, spreadsheet_id: &str) -> Result<Vec<Trigger>, SheethookError>;
    async fn delete(&self, id: &str) -> Result<(), SheethookError>;
    async fn create(
        &self,
        spreadsheet_id: &str,
        handler: &str,
        event: TriggerEvent,
    ) -> Result<Trigger, SheethookError>;
}

/// Whether the workbook has a form-submit trigger for our handler.
pub async fn is_installed(
    registry: &dyn TriggerRegistry,
    spreadsheet_id: &str,
) -> Result<bool, SheethookError> {
    Ok(registry
        .list(spreadsheet_id)
        .await?
        .iter()
        .any(Trigger::is_form_submit_handler))
}

/// Replace any existing form-submit registration with a single new one.
///
/// The operator always gets a notice; failures are also logged and
/// returned.
pub async fn install_form_submit_trigger(
    registry: &dyn TriggerRegistry,
    spreadsheet_id: &str,
    notifier: &dyn Notifier,
) -> Result<Trigger, SheethookError> {
    match replace_trigger(registry, spreadsheet_id).await {
        Ok(trigger) => {
            tracing::info!(
                spreadsheet_id = %spreadsheet_id,
                trigger_id = %trigger.id,
                "form-submit trigger created"
            );
            notifier.notify(
                "Trigger setup",
                "The form-submit trigger is set up for this whole workbook.",
                Buttons::Ok,
            );
            Ok(trigger)
        }
        Err(e) => {
            tracing::error!(spreadsheet_id = %spreadsheet_id, error = %e, "trigger setup failed");
            notifier.notify(
                "Trigger setup failed",
                &format!("Could not create the trigger. Check permissions and try again.\nError: {e}"),
                Buttons::Ok,
            );
            Err(e)
        }
    }
}

async fn replace_trigger(
    registry: &dyn TriggerRegistry,
    spreadsheet_id: &str,
) -> Result<Trigger, SheethookError> {
    for trigger in registry.list(spreadsheet_id).await? {
        if trigger.is_form_submit_handler() {
            registry.delete(&trigger.id).await?;
            tracing::info!(trigger_id = %trigger.id, "removed previous form-submit trigger");
        }
    }
    registry
        .create(spreadsheet_id, FORM_SUBMIT_HANDLER, TriggerEvent::FormSubmit)
        .await
}

fn new_trigger(spreadsheet_id: &str, handler: &str, event: TriggerEvent) -> Trigger {
    Trigger {
        id: uuid::Uuid::new_v4().to_string(),
        spreadsheet_id: spreadsheet_id.to_string(),
        handler: handler.to_string(),
        event,
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TriggerFile {
    #[serde(default)]
    triggers: Vec<Trigger>,
}

/// Registry persisted as a JSON file. A missing file is an empty registry.
pub struct FileTriggerRegistry {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileTriggerRegistry {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<TriggerFile, SheethookError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| SheethookError::TriggerRegistry {
                    message: format!("{}: {e}", self.path.display()),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TriggerFile::default()),
            Err(e) => Err(SheethookError::Io(e)),
        }
    }

    async fn write(&self, file: &TriggerFile) -> Result<(), SheethookError> {
        let content =
            serde_json::to_string_pretty(file).map_err(|e| SheethookError::TriggerRegistry {
                message: e.to_string(),
            })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TriggerRegistry for FileTriggerRegistry {
    async fn list(&self, spreadsheet_id: &str) -> Result<Vec<Trigger>, SheethookError> {
        Ok(self
            .read()
            .await?
            .triggers
            .into_iter()
            .filter(|t| t.spreadsheet_id == spreadsheet_id)
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), SheethookError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        file.triggers.retain(|t| t.id != id);
        self.write(&file).await
    }

    async fn create(
        &self,
        spreadsheet_id: &str,
        handler: &str,
        event: TriggerEvent,
    ) -> Result<Trigger, SheethookError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        let trigger = new_trigger(spreadsheet_id, handler, event);
        file.triggers.push(trigger.clone());
        self.write(&file).await?;
        Ok(trigger)
    }
}

/// In-process registry, for embedding and tests.
#[derive(Default)]
pub struct MemoryTriggerRegistry {
    triggers: Mutex<Vec<Trigger>>,
}

impl MemoryTriggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Trigger>>, SheethookError> {
        self.triggers
            .lock()
            .map_err(|_| SheethookError::TriggerRegistry {
                message: "registry lock poisoned".into(),
            })
    }
}

#[async_trait]
impl TriggerRegistry for MemoryTriggerRegistry {
    async fn list(&self, spreadsheet_id: &str) -> Result<Vec<Trigger>, SheethookError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|t| t.spreadsheet_id == spreadsheet_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), SheethookError> {
        self.lock()?.retain(|t| t.id != id);
        Ok(())
    }

    async fn create(
        &self,
        spreadsheet_id: &str,
        handler: &str,
        event: TriggerEvent,
    ) -> Result<Trigger, SheethookError> {
        let trigger = new_trigger(spreadsheet_id, handler, event);
        self.lock()?.push(trigger.clone());
        Ok(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::notify::Button;

    #[derive(Default)]
    struct Silent {
        titles: Mutex<Vec<String>>,
    }

    impl Notifier for Silent {
        fn notify(&self, title: &str, _message: &str, _buttons: Buttons) -> Button {
            self.titles.lock().unwrap().push(title.to_string());
            Button::Ok
        }
    }

    #[tokio::test]
    async fn install_is_idempotent() {
        let registry = MemoryTriggerRegistry::new();
        let notifier = Silent::default();

        install_form_submit_trigger(&registry, "SSID1", &notifier)
            .await
            .unwrap();
        let second = install_form_submit_trigger(&registry, "SSID1", &notifier)
            .await
            .unwrap();

        let triggers = registry.list("SSID1").await.unwrap();
        assert_eq!(triggers, vec![second]);
        assert_eq!(
            *notifier.titles.lock().unwrap(),
            vec!["Trigger setup", "Trigger setup"]
        );
    }

    #[tokio::test]
    async fn install_keeps_unrelated_triggers() {
        let registry = MemoryTriggerRegistry::new();
        let edit = registry
            .create("SSID1", "on_edit", TriggerEvent::Edit)
            .await
            .unwrap();
        let other_book = registry
            .create("SSID2", FORM_SUBMIT_HANDLER, TriggerEvent::FormSubmit)
            .await
            .unwrap();

        install_form_submit_trigger(&registry, "SSID1", &Silent::default())
            .await
            .unwrap();

        let triggers = registry.list("SSID1").await.unwrap();
        assert_eq!(triggers.len(), 2);
        assert!(triggers.contains(&edit));
        assert_eq!(registry.list("SSID2").await.unwrap(), vec![other_book]);
    }

    #[tokio::test]
    async fn is_installed_reflects_registry() {
        let registry = MemoryTriggerRegistry::new();
        assert!(!is_installed(&registry, "SSID1").await.unwrap());
        registry
            .create("SSID1", "on_edit", TriggerEvent::Edit)
            .await
            .unwrap();
        assert!(!is_installed(&registry, "SSID1").await.unwrap());
        install_form_submit_trigger(&registry, "SSID1", &Silent::default())
            .await
            .unwrap();
        assert!(is_installed(&registry, "SSID1").await.unwrap());
    }

    #[tokio::test]
    async fn file_registry_persists_across_instances() {
        let path = std::env::temp_dir().join(format!(
            "sheethook-triggers-{}.json",
            uuid::Uuid::new_v4()
        ));

        let first = FileTriggerRegistry::new(path.clone());
        assert!(first.list("SSID1").await.unwrap().is_empty());
        install_form_submit_trigger(&first, "SSID1", &Silent::default())
            .await
            .unwrap();
        install_form_submit_trigger(&first, "SSID1", &Silent::default())
            .await
            .unwrap();

        let second = FileTriggerRegistry::new(path.clone());
        let triggers = second.list("SSID1").await.unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].handler, FORM_SUBMIT_HANDLER);
        assert_eq!(triggers[0].event, TriggerEvent::FormSubmit);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn corrupt_registry_file_reports_error() {
        let path = std::env::temp_dir().join(format!(
            "sheethook-triggers-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "not json").unwrap();

        let registry = FileTriggerRegistry::new(path.clone());
        let notifier = Silent::default();
        let err = install_form_submit_trigger(&registry, "SSID1", &notifier)
            .await
            .unwrap_err();
        assert!(matches!(err, SheethookError::TriggerRegistry { .. }));
        assert_eq!(*notifier.titles.lock().unwrap(), vec!["Trigger setup failed"]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn stored_event_names_are_snake_case() {
        let trigger = Trigger {
            id: "t1".into(),
            spreadsheet_id: "SSID1".into(),
            handler: FORM_SUBMIT_HANDLER.into(),
            event: TriggerEvent::FormSubmit,
        };
        let value = serde_json::to_value(&trigger).unwrap();
        assert_eq!(value["event"], "form_submit");
        assert_eq!(serde_json::to_value(TriggerEvent::Edit).unwrap(), "edit");
        assert!(serde_json::from_str::<TriggerEvent>("\"open\"").is_err());
    }
}
