//! JSON backups of a workspace
//!
//! A backup is a versioned JSON document holding every card, partner and
//! document, plus the application settings:
//!
//! ```json
//! {
//!   "version": 2,
//!   "timestamp": "2024-05-01T10:00:00Z",
//!   "data": {
//!     "cards": [ ... ],
//!     "partners": [ ... ],
//!     "documents": [ ... ],
//!     "settings": { "theme": "light", ... }
//!   }
//! }
//! ```
//!
//! Version 1 files carry only `cards`; the other lists default to empty.
//! Importing replaces the store contents. Record creation times come from the
//! backup, update times from the moment of import.

use crate::config::AppSettings;
use crate::core::entity::Record;
use crate::core::error::{Result, StoreError};
use crate::core::model::{Document, Partner};
use crate::core::workspace::Workspace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format version written by [`export_backup`]
pub const BACKUP_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Record"))]
pub struct Backup<T> {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub data: BackupData<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Record"))]
pub struct BackupData<T> {
    #[serde(default = "Vec::new")]
    pub cards: Vec<T>,
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,
}

impl<T> BackupData<T> {
    /// Cards only, with no partners, documents or settings
    pub fn with_cards(cards: Vec<T>) -> Self {
        Self {
            cards,
            partners: Vec::new(),
            documents: Vec::new(),
            settings: None,
        }
    }
}

impl<T: Record> Backup<T> {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a backup document
    pub fn from_json(json: &str) -> Result<Self> {
        let backup: Self = serde_json::from_str(json)?;
        backup.validate()?;
        Ok(backup)
    }

    fn validate(&self) -> Result<()> {
        if self.version == 0 || self.version > BACKUP_VERSION {
            return Err(StoreError::InvalidBackup(format!(
                "unsupported backup version {}",
                self.version
            )));
        }
        Ok(())
    }
}

/// Snapshot every card, partner and document in `workspace` together with
/// its current settings
pub async fn export_backup<T: Record>(workspace: &Workspace<T>) -> Result<Backup<T>> {
    let cards = workspace.cards.get_all().await?;
    let partners = workspace.partners().await?;
    let documents = workspace.documents().await?;
    let settings = workspace.settings().await?;

    tracing::info!(
        resource = T::resource_name(),
        cards = cards.len(),
        partners = partners.len(),
        documents = documents.len(),
        "backup exported"
    );

    Ok(Backup {
        version: BACKUP_VERSION,
        timestamp: Utc::now(),
        data: BackupData {
            cards,
            partners,
            documents,
            settings: Some(settings),
        },
    })
}

/// Replace the cards, partners and documents of `workspace` with those of
/// `backup`
///
/// Settings carried by the backup are persisted as well. Returns the settings
/// in effect after the import. The backup is validated before anything is
/// deleted.
pub async fn import_backup<T: Record>(
    workspace: &Workspace<T>,
    backup: Backup<T>,
) -> Result<AppSettings> {
    if let Err(err) = backup.validate() {
        tracing::warn!(resource = T::resource_name(), error = %err, "backup rejected");
        return Err(err);
    }

    workspace.cards.clear().await?;
    workspace.partners.clear().await?;
    workspace.documents.clear().await?;

    let BackupData {
        cards,
        partners,
        documents,
        settings,
    } = backup.data;
    let (card_count, partner_count, document_count) =
        (cards.len(), partners.len(), documents.len());

    for card in cards {
        workspace.cards.put(card).await?;
    }
    for partner in partners {
        workspace.partners.put(partner).await?;
    }
    for document in documents {
        workspace.documents.put(document).await?;
    }
    if let Some(settings) = settings {
        workspace.replace_settings(settings).await?;
    }

    tracing::info!(
        resource = T::resource_name(),
        cards = card_count,
        partners = partner_count,
        documents = document_count,
        "backup imported"
    );
    workspace.settings().await
}
