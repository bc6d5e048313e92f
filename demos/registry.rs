//! Registry walkthrough
//!
//! This example demonstrates:
//! - Opening a workspace from a YAML configuration (or the in-memory default)
//! - Loading cards into a registry state slice
//! - Filtering, sorting and paging the derived view
//! - The partner directory and persisted settings
//! - Statistics and a JSON backup round-trip
//!
//! Run with `cargo run --example registry [config.yaml]`.

use collateral::prelude::*;
use std::sync::Arc;

fn demo_cards() -> Vec<ExtendedCollateralCard> {
    let mut flat = ExtendedCollateralCard::new("З-0001", "Квартира, 2 комнаты", MainCategory::RealEstate);
    flat.address = Some(Address {
        region: Some("Москва".into()),
        full_address: Some("г. Москва, ул. Профсоюзная, д. 12, кв. 40".into()),
        ..Default::default()
    });
    flat.partners = Some(vec![Partner::individual(PartnerRole::Owner, "Иванов", "Пётр")]);
    flat.documents = Some(vec![Document::new("egrn.pdf", "egrn", "application/pdf", 48_213)]);
    flat.market_value = Some(14_500_000.0);

    let mut truck = ExtendedCollateralCard::new("З-0002", "Седельный тягач", MainCategory::Movable);
    truck.card.status = CardStatus::Approved;
    truck.partners = Some(vec![Partner::legal(PartnerRole::Pledgor, "ООО ТрансЛайн")]);
    truck.market_value = Some(6_200_000.0);

    let mut lease = ExtendedCollateralCard::new("З-0003", "Право аренды участка", MainCategory::PropertyRights);
    lease.address = Some(Address {
        region: Some("Московская область".into()),
        full_address: Some("Московская обл., г. Подольск".into()),
        ..Default::default()
    });

    vec![flat, truck, lease]
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Collateral Registry Example");
    println!("===========================\n");

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => CmsConfig::from_yaml_file(&path)?,
        None => CmsConfig::default_config(),
    };
    println!("Storage backend: {:?}\n", config.storage.backend);

    let workspace = open_workspace::<ExtendedCollateralCard>(&config.storage)?;
    let store = Arc::clone(&workspace.cards);
    for card in demo_cards() {
        for partner in card.partners.iter().flatten() {
            workspace.save_partner(partner.clone()).await?;
        }
        store.put(card).await?;
    }
    workspace
        .save_settings(SettingsPatch {
            theme: Some(config.settings.theme),
            language: Some(config.settings.language),
            sidebar_collapsed: Some(config.settings.sidebar_collapsed),
        })
        .await?;

    // Load into the state slice
    let mut registry = RegistryState::<ExtendedCollateralCard>::new();
    registry.refresh(&*store).await?;
    println!("Loaded {} cards", registry.items().len());

    registry.set_filter(FilterSpec {
        search_query: Some("москв".into()),
        ..Default::default()
    });
    registry.set_sort(SortSpec::parse("marketValue:desc"));
    println!("Matching \"москв\":");
    for card in registry.view() {
        println!("   - {} {} ({})", card.card.number, card.card.name, card.card.main_category.label());
    }

    registry.clear_filter();
    let page = paginate(registry.view(), 1, 2);
    println!(
        "\nPage {}/{} holds {} of {} cards",
        page.pagination.page,
        page.pagination.total_pages,
        page.data.len(),
        page.pagination.total
    );

    println!("\nPartners matching \"транс\":");
    for partner in workspace.search_partners("транс").await? {
        println!("   - {}", partner.display_name());
    }

    let stats = Statistics::collect(registry.items());
    println!("\nStatistics: {}", serde_json::to_string_pretty(&stats)?);

    // Backup round-trip
    let backup = export_backup(&workspace).await?;
    let json = backup.to_json()?;
    println!(
        "\nBackup: {} bytes, version {}, {} partners",
        json.len(),
        backup.version,
        backup.data.partners.len()
    );

    let restored = Backup::<ExtendedCollateralCard>::from_json(&json)?;
    let settings = import_backup(&workspace, restored).await?;
    registry.refresh(&*workspace.cards).await?;
    println!(
        "Restored {} cards, theme {:?}",
        registry.items().len(),
        settings.theme
    );

    Ok(())
}
