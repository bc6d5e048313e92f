//! The full set of stores a registry deployment keeps
//!
//! Cards live next to the standalone partner and document directories and a
//! single settings slot. Backups read and write all four.

use crate::config::{AppSettings, SettingsPatch};
use crate::core::entity::Record;
use crate::core::error::Result;
use crate::core::model::{Document, Partner};
use crate::core::query;
use crate::core::service::RecordStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Key of the one settings record
pub const SETTINGS_KEY: &str = "app-settings";

/// Application settings as persisted in the settings store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    pub id: String,
    #[serde(flatten)]
    pub settings: AppSettings,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl StoredSettings {
    pub fn new(settings: AppSettings) -> Self {
        let now = Utc::now();
        Self {
            id: SETTINGS_KEY.to_string(),
            settings,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for StoredSettings {
    fn resource_name() -> &'static str {
        "settings"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}

/// Cards of shape `T` plus partners, documents and settings
pub struct Workspace<T: Record> {
    pub cards: Arc<dyn RecordStore<T>>,
    pub partners: Arc<dyn RecordStore<Partner>>,
    pub documents: Arc<dyn RecordStore<Document>>,
    pub settings: Arc<dyn RecordStore<StoredSettings>>,
}

impl<T: Record> Clone for Workspace<T> {
    fn clone(&self) -> Self {
        Self {
            cards: Arc::clone(&self.cards),
            partners: Arc::clone(&self.partners),
            documents: Arc::clone(&self.documents),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<T: Record> Workspace<T> {
    pub fn new(
        cards: Arc<dyn RecordStore<T>>,
        partners: Arc<dyn RecordStore<Partner>>,
        documents: Arc<dyn RecordStore<Document>>,
        settings: Arc<dyn RecordStore<StoredSettings>>,
    ) -> Self {
        Self {
            cards,
            partners,
            documents,
            settings,
        }
    }

    /// Insert or replace a partner, returning its id
    pub async fn save_partner(&self, partner: Partner) -> Result<String> {
        self.partners.put(partner).await
    }

    pub async fn partners(&self) -> Result<Vec<Partner>> {
        self.partners.get_all().await
    }

    /// Stored partners matching `needle` by name or INN
    pub async fn search_partners(&self, needle: &str) -> Result<Vec<Partner>> {
        let all = self.partners.get_all().await?;
        Ok(query::search_partners(&all, needle)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Insert or replace a document, returning its id
    pub async fn save_document(&self, document: Document) -> Result<String> {
        self.documents.put(document).await
    }

    pub async fn documents(&self) -> Result<Vec<Document>> {
        self.documents.get_all().await
    }

    /// Current settings, or the defaults when none were saved yet
    pub async fn settings(&self) -> Result<AppSettings> {
        Ok(self
            .settings
            .get(SETTINGS_KEY)
            .await?
            .map(|stored| stored.settings)
            .unwrap_or_default())
    }

    /// Merge `patch` into the current settings and persist the result
    pub async fn save_settings(&self, patch: SettingsPatch) -> Result<AppSettings> {
        let mut settings = self.settings().await?;
        settings.apply(patch);
        self.replace_settings(settings.clone()).await?;
        Ok(settings)
    }

    pub(crate) async fn replace_settings(&self, settings: AppSettings) -> Result<()> {
        self.settings.put(StoredSettings::new(settings)).await?;
        tracing::debug!("settings saved");
        Ok(())
    }
}

#[cfg(all(test, feature = "in-memory"))]
mod tests {
    use super::*;
    use crate::config::{Language, StorageConfig, ThemeMode};
    use crate::core::model::{ExtendedCollateralCard, PartnerRole};
    use crate::storage::open_workspace;

    fn workspace() -> Workspace<ExtendedCollateralCard> {
        open_workspace(&StorageConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_settings_default_until_saved() {
        let ws = workspace();
        assert_eq!(ws.settings().await.unwrap(), AppSettings::default());

        let saved = ws
            .save_settings(SettingsPatch {
                theme: Some(ThemeMode::Dark),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(saved.theme, ThemeMode::Dark);

        // a second patch merges into what was stored
        ws.save_settings(SettingsPatch {
            language: Some(Language::En),
            ..Default::default()
        })
        .await
        .unwrap();

        let current = ws.settings().await.unwrap();
        assert_eq!(current.theme, ThemeMode::Dark);
        assert_eq!(current.language, Language::En);
        assert_eq!(ws.settings.count().await.unwrap(), 1);
    }

    #[test]
    fn test_stored_settings_json_is_flat() {
        let json = serde_json::to_value(StoredSettings::new(AppSettings::default())).unwrap();
        assert_eq!(json["id"], "app-settings");
        assert_eq!(json["theme"], "light");
        assert!(json.get("settings").is_none());
    }

    #[tokio::test]
    async fn test_search_partners_reads_the_store() {
        let ws = workspace();
        let mut org = Partner::legal(PartnerRole::Pledgor, "ООО Ромашка");
        org.inn = Some("7701234567".to_string());
        ws.save_partner(org).await.unwrap();
        ws.save_partner(Partner::individual(PartnerRole::Owner, "Иванов", "Иван"))
            .await
            .unwrap();

        let by_name = ws.search_partners("ромаш").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].display_name(), "ООО Ромашка");

        let by_inn = ws.search_partners("77012").await.unwrap();
        assert_eq!(by_inn.len(), 1);

        assert_eq!(ws.partners().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_resaved_document_keeps_upload_date() {
        let ws = workspace();
        let mut doc = Document::new("Договор.pdf", "contract", "application/pdf", 512);
        let uploaded = doc.upload_date - chrono::Duration::days(3);
        doc.upload_date = uploaded;
        ws.save_document(doc.clone()).await.unwrap();

        doc.upload_date = Utc::now();
        doc.description = Some("Подписанный".to_string());
        ws.save_document(doc).await.unwrap();

        let stored = ws.documents().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].upload_date, uploaded);
        assert_eq!(stored[0].description.as_deref(), Some("Подписанный"));
    }
}
