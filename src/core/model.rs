//! Collateral record shapes: base cards, extended cards and registry rows
//!
//! All three shapes implement [`Collateral`], so one query engine serves the
//! card list, the extended card list and the registry table. JSON field names
//! are camelCase to stay compatible with exported browser backups.

use crate::core::entity::{Collateral, Record};
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Coarse classification of a pledged asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainCategory {
    RealEstate,
    Movable,
    PropertyRights,
}

impl MainCategory {
    pub const ALL: [MainCategory; 3] = [
        MainCategory::RealEstate,
        MainCategory::Movable,
        MainCategory::PropertyRights,
    ];

    /// Russian label shown in registries and exports
    pub fn label(self) -> &'static str {
        match self {
            MainCategory::RealEstate => "Недвижимость",
            MainCategory::Movable => "Движимое имущество",
            MainCategory::PropertyRights => "Имущественные права",
        }
    }

    /// Reverse of [`label`](Self::label). Unknown labels fall back to real estate.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or(MainCategory::RealEstate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MainCategory::RealEstate => "real_estate",
            MainCategory::Movable => "movable",
            MainCategory::PropertyRights => "property_rights",
        }
    }
}

/// Lifecycle flag of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Editing,
    Approved,
    Archived,
}

impl CardStatus {
    pub const ALL: [CardStatus; 3] = [CardStatus::Editing, CardStatus::Approved, CardStatus::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            CardStatus::Editing => "editing",
            CardStatus::Approved => "approved",
            CardStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerType {
    Individual,
    Legal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerRole {
    Owner,
    Pledgor,
    Appraiser,
    Other,
}

// ---------------------------------------------------------------------------
// Nested value types
// ---------------------------------------------------------------------------

/// Hierarchical category labels (display only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub level0: String,
    pub level1: String,
    pub level2: String,
}

impl Classification {
    pub fn new(
        level0: impl Into<String>,
        level1: impl Into<String>,
        level2: impl Into<String>,
    ) -> Self {
        Self {
            level0: level0.into(),
            level1: level1.into(),
            level2: level2.into(),
        }
    }
}

/// Attribute taxonomy levels (kind, type, subtype, functional group/subgroup)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeLevels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level5: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadastral_number: Option<String>,
}

/// A person or organization associated with a pledged asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    #[serde(rename = "type")]
    pub partner_type: PartnerType,
    pub role: PartnerRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    /// Share of the right, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
    #[serde(default)]
    pub show_in_registry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Partner {
    /// Create an individual with the given last/first name
    pub fn individual(role: PartnerRole, last_name: &str, first_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            partner_type: PartnerType::Individual,
            role,
            last_name: Some(last_name.to_string()),
            first_name: Some(first_name.to_string()),
            middle_name: None,
            organization_name: None,
            inn: None,
            share: None,
            show_in_registry: true,
            short_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a legal entity with the given organization name
    pub fn legal(role: PartnerRole, organization_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            partner_type: PartnerType::Legal,
            role,
            last_name: None,
            first_name: None,
            middle_name: None,
            organization_name: Some(organization_name.to_string()),
            inn: None,
            share: None,
            show_in_registry: true,
            short_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// "Last First Middle" for individuals, the organization name otherwise
    pub fn display_name(&self) -> String {
        match self.partner_type {
            PartnerType::Individual => [&self.last_name, &self.first_name, &self.middle_name]
                .into_iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            PartnerType::Legal => self.organization_name.clone().unwrap_or_default(),
        }
    }
}

/// An attachment on an extended card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Size in bytes
    pub size: u64,
    pub mime_type: String,
    pub upload_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inline file contents as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
}

impl Document {
    pub fn new(name: &str, doc_type: &str, mime_type: &str, size: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            doc_type: doc_type.to_string(),
            size,
            mime_type: mime_type.to_string(),
            upload_date: Utc::now(),
            category: None,
            description: None,
            file_data: None,
        }
    }
}

impl Record for Partner {
    fn resource_name() -> &'static str {
        "partner"
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

/// Documents only track when they were first uploaded, so a re-save keeps
/// the original `upload_date`.
impl Record for Document {
    fn resource_name() -> &'static str {
        "document"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.upload_date
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.upload_date
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, _updated_at: DateTime<Utc>) {
        self.upload_date = created_at;
    }
}

// ---------------------------------------------------------------------------
// CollateralCard
// ---------------------------------------------------------------------------

/// Base collateral card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralCard {
    pub id: String,
    pub number: String,
    pub name: String,
    pub main_category: MainCategory,
    #[serde(default)]
    pub classification: Classification,
    /// Central bank classification code
    #[serde(default)]
    pub cb_code: i64,
    pub status: CardStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_levels: Option<AttributeLevels>,
    /// Free-form characteristics keyed by attribute name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<serde_json::Value>,
}

impl CollateralCard {
    /// Create a new card in `editing` status with a fresh id
    pub fn new(number: &str, name: &str, main_category: MainCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            number: number.to_string(),
            name: name.to_string(),
            main_category,
            classification: Classification::default(),
            cb_code: 0,
            status: CardStatus::Editing,
            created_at: now,
            updated_at: now,
            attribute_levels: None,
            characteristics: None,
        }
    }
}

/// Sortable keys of [`CollateralCard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardField {
    Id,
    Number,
    Name,
    MainCategory,
    Status,
    CbCode,
    CreatedAt,
    UpdatedAt,
}

impl Record for CollateralCard {
    fn resource_name() -> &'static str {
        "collateral_card"
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

impl Collateral for CollateralCard {
    type Field = CardField;

    fn number(&self) -> &str {
        &self.number
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn main_category(&self) -> MainCategory {
        self.main_category
    }

    fn status(&self) -> CardStatus {
        self.status
    }

    fn field_value(&self, field: CardField) -> Option<FieldValue> {
        Some(match field {
            CardField::Id => self.id.as_str().into(),
            CardField::Number => self.number.as_str().into(),
            CardField::Name => self.name.as_str().into(),
            CardField::MainCategory => self.main_category.as_str().into(),
            CardField::Status => self.status.as_str().into(),
            CardField::CbCode => self.cb_code.into(),
            CardField::CreatedAt => self.created_at.into(),
            CardField::UpdatedAt => self.updated_at.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// ExtendedCollateralCard
// ---------------------------------------------------------------------------

/// Full card: base fields plus partners, address, documents and valuations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedCollateralCard {
    #[serde(flatten)]
    pub card: CollateralCard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<Partner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pledge_value: Option<f64>,
}

impl ExtendedCollateralCard {
    pub fn new(number: &str, name: &str, main_category: MainCategory) -> Self {
        Self::from(CollateralCard::new(number, name, main_category))
    }
}

impl From<CollateralCard> for ExtendedCollateralCard {
    fn from(card: CollateralCard) -> Self {
        Self {
            card,
            partners: None,
            address: None,
            documents: None,
            market_value: None,
            pledge_value: None,
        }
    }
}

/// Sortable keys of [`ExtendedCollateralCard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedCardField {
    Id,
    Number,
    Name,
    MainCategory,
    Status,
    CbCode,
    CreatedAt,
    UpdatedAt,
    Region,
    FullAddress,
    MarketValue,
    PledgeValue,
    DocumentCount,
}

impl Record for ExtendedCollateralCard {
    fn resource_name() -> &'static str {
        "extended_collateral_card"
    }

    fn id(&self) -> &str {
        &self.card.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.card.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.card.updated_at
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.card.set_timestamps(created_at, updated_at);
    }
}

impl Collateral for ExtendedCollateralCard {
    type Field = ExtendedCardField;

    fn number(&self) -> &str {
        &self.card.number
    }

    fn name(&self) -> &str {
        &self.card.name
    }

    fn main_category(&self) -> MainCategory {
        self.card.main_category
    }

    fn status(&self) -> CardStatus {
        self.card.status
    }

    fn full_addresses(&self) -> Vec<&str> {
        self.address
            .as_ref()
            .and_then(|a| a.full_address.as_deref())
            .into_iter()
            .collect()
    }

    fn region(&self) -> Option<&str> {
        self.address.as_ref()?.region.as_deref()
    }

    fn partner_names(&self) -> Vec<String> {
        self.partners
            .iter()
            .flatten()
            .map(Partner::display_name)
            .filter(|name| !name.is_empty())
            .collect()
    }

    fn document_count(&self) -> usize {
        self.documents.as_ref().map_or(0, Vec::len)
    }

    fn partner_count(&self) -> usize {
        self.partners.as_ref().map_or(0, Vec::len)
    }

    fn field_value(&self, field: ExtendedCardField) -> Option<FieldValue> {
        let base = |f: CardField| self.card.field_value(f);

        match field {
            ExtendedCardField::Id => base(CardField::Id),
            ExtendedCardField::Number => base(CardField::Number),
            ExtendedCardField::Name => base(CardField::Name),
            ExtendedCardField::MainCategory => base(CardField::MainCategory),
            ExtendedCardField::Status => base(CardField::Status),
            ExtendedCardField::CbCode => base(CardField::CbCode),
            ExtendedCardField::CreatedAt => base(CardField::CreatedAt),
            ExtendedCardField::UpdatedAt => base(CardField::UpdatedAt),
            ExtendedCardField::Region => self.region().map(FieldValue::from),
            ExtendedCardField::FullAddress => {
                self.full_addresses().first().copied().map(FieldValue::from)
            }
            ExtendedCardField::MarketValue => self.market_value.map(FieldValue::Float),
            ExtendedCardField::PledgeValue => self.pledge_value.map(FieldValue::Float),
            ExtendedCardField::DocumentCount => {
                Some(FieldValue::Integer(self.document_count() as i64))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RegistryEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryAddress {
    #[serde(rename = "fullAddress", skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOwner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
}

/// Identifying characteristics shown in the registry table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryIdentifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadastral_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

/// Row of the pledged-assets registry table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub id: String,
    pub number: String,
    pub name: String,
    pub main_category: MainCategory,
    pub status: CardStatus,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub addresses: Vec<RegistryAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<RegistryOwner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<RegistryIdentifiers>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegistryEntry {
    pub fn new(number: &str, name: &str, main_category: MainCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            number: number.to_string(),
            name: name.to_string(),
            main_category,
            status: CardStatus::Editing,
            classification: Classification::default(),
            addresses: Vec::new(),
            owner: None,
            characteristics: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sortable keys of [`RegistryEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistryField {
    Id,
    Number,
    Name,
    MainCategory,
    Status,
    OwnerName,
    CreatedAt,
    UpdatedAt,
}

impl Record for RegistryEntry {
    fn resource_name() -> &'static str {
        "registry_entry"
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

impl Collateral for RegistryEntry {
    type Field = RegistryField;

    fn number(&self) -> &str {
        &self.number
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn main_category(&self) -> MainCategory {
        self.main_category
    }

    fn status(&self) -> CardStatus {
        self.status
    }

    fn full_addresses(&self) -> Vec<&str> {
        self.addresses
            .iter()
            .filter_map(|a| a.full_address.as_deref())
            .collect()
    }

    fn partner_names(&self) -> Vec<String> {
        self.owner
            .as_ref()
            .and_then(|o| o.name.clone())
            .into_iter()
            .collect()
    }

    fn partner_count(&self) -> usize {
        usize::from(self.owner.is_some())
    }

    fn field_value(&self, field: RegistryField) -> Option<FieldValue> {
        match field {
            RegistryField::Id => Some(self.id.as_str().into()),
            RegistryField::Number => Some(self.number.as_str().into()),
            RegistryField::Name => Some(self.name.as_str().into()),
            RegistryField::MainCategory => Some(self.main_category.as_str().into()),
            RegistryField::Status => Some(self.status.as_str().into()),
            RegistryField::OwnerName => self.owner.as_ref()?.name.as_deref().map(FieldValue::from),
            RegistryField::CreatedAt => Some(self.created_at.into()),
            RegistryField::UpdatedAt => Some(self.updated_at.into()),
        }
    }
}
