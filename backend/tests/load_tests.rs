//! Load service tests against the in-memory repository
//!
//! Covers:
//! - Ordinal numbering of new loads
//! - Detail aggregates (balance, progress, distribution)
//! - Dispatch / reopen transitions
//! - Deleting a load returns its packages to stock
//! - Impact simulation and CSV export

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use shared::constants::STOCK_DESTINATION;
use shared::{LengthCategory, Load, LoadStatus, LoadStatusColor, Package, PackageDraft};
use timber_dispatch_backend::repository::{InMemoryRepository, PackageRepository};
use timber_dispatch_backend::services::export::ExportService;
use timber_dispatch_backend::services::load::{CreateLoadInput, EstimateQuery, LoadService};
use timber_dispatch_backend::services::reports::{ReportFilter, ReportService};
use timber_dispatch_backend::AppError;

// ============================================================================
// Helpers
// ============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn package(id: &str, destination: &str, lines: &[(i32, i32)]) -> Package {
    let draft = lines
        .iter()
        .fold(PackageDraft::new(id, destination), |draft, &(l, p)| draft.line(l, p));
    Package::build(draft)
}

fn yard() -> Arc<InMemoryRepository> {
    Arc::new(InMemoryRepository::with_data(
        vec![Load::new("Carga Norte", "1ra Carga")],
        vec![
            package("PT-1270", "Carga Norte", &[(8, 100)]),
            package("PT-1271", "Carga Norte", &[(16, 50)]),
            package("PT-1272", STOCK_DESTINATION, &[(10, 40)]),
        ],
    ))
}

fn create(name: &str) -> CreateLoadInput {
    CreateLoadInput {
        name: name.to_string(),
        number: None,
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_new_loads_get_ordinal_numbers() {
    let service = LoadService::new(Arc::new(InMemoryRepository::new()));

    let first = service.create_load(create("Carga A")).await.unwrap();
    let second = service.create_load(create("Carga B")).await.unwrap();
    let third = service.create_load(create("Carga C")).await.unwrap();
    let fourth = service.create_load(create("Carga D")).await.unwrap();

    assert_eq!(first.number, "1ra Carga");
    assert_eq!(second.number, "2da Carga");
    assert_eq!(third.number, "3ra Carga");
    assert_eq!(fourth.number, "4ta Carga");
    assert_eq!(first.status, LoadStatus::Active);
}

#[tokio::test]
async fn test_duplicate_or_reserved_load_name_rejected() {
    let service = LoadService::new(yard());

    let duplicate = service.create_load(create("Carga Norte")).await;
    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));

    let reserved = service.create_load(create(STOCK_DESTINATION)).await;
    assert!(matches!(reserved, Err(AppError::Validation { .. })));
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_load_detail_aggregates() {
    let service = LoadService::new(yard());

    let detail = service.get_load_detail("Carga Norte").await.unwrap();

    assert_eq!(detail.packages.len(), 2);
    assert_eq!(detail.balance.total_board_feet, dec("629.634"));
    assert_eq!(detail.balance.short_board_feet, dec("314.817"));
    assert_eq!(detail.balance.long_board_feet, dec("314.817"));
    assert_eq!(detail.balance.short_pct, dec("50"));
    assert_eq!(detail.status_color, LoadStatusColor::Info);
    assert!(detail.progress > Decimal::ZERO && detail.progress < dec("20"));

    let short = detail.distribution.subtotal(LengthCategory::Short).unwrap();
    assert_eq!(short.piece_count, 100);
    assert_eq!(detail.distribution.total_piece_count(), 150);
}

#[tokio::test]
async fn test_unknown_load_is_not_found() {
    let service = LoadService::new(yard());

    assert!(matches!(
        service.get_load_detail("Carga Sur").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_loads_reports_fill_level() {
    let service = LoadService::new(yard());

    let loads = service.list_loads().await.unwrap();

    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].package_count, 2);
    assert_eq!(loads[0].total_board_feet, dec("629.634"));
}

// ============================================================================
// Status transitions
// ============================================================================

#[tokio::test]
async fn test_dispatch_and_reopen() {
    let repo = yard();
    let service = LoadService::new(repo.clone());

    let dispatched = service.dispatch_load("Carga Norte").await.unwrap();
    assert_eq!(dispatched.status, LoadStatus::Dispatched);
    assert!(matches!(
        service.dispatch_load("Carga Norte").await,
        Err(AppError::InvalidStateTransition(_))
    ));

    // Shipped volume moves from active to shipped
    let reports = ReportService::new(repo.clone()).summary().await.unwrap();
    assert_eq!(reports.shipped_board_feet, dec("629.634"));
    assert_eq!(reports.active_board_feet, Decimal::ZERO);

    let reopened = service.reopen_load("Carga Norte").await.unwrap();
    assert_eq!(reopened.status, LoadStatus::Active);
    assert!(matches!(
        service.reopen_load("Carga Norte").await,
        Err(AppError::InvalidStateTransition(_))
    ));
}

#[tokio::test]
async fn test_delete_load_moves_packages_to_stock() {
    let repo = yard();
    let service = LoadService::new(repo.clone());

    let moved = service.delete_load("Carga Norte").await.unwrap();

    assert_eq!(moved, 2);
    assert!(repo.list_loads().await.unwrap().is_empty());
    let packages = repo.list_packages().await.unwrap();
    assert!(packages.iter().all(|p| p.destination == STOCK_DESTINATION));

    let reports = ReportService::new(repo).summary().await.unwrap();
    assert_eq!(reports.stock_board_feet, reports.total_board_feet);
}

// ============================================================================
// Estimate and export
// ============================================================================

#[tokio::test]
async fn test_estimate_adds_to_category() {
    let service = LoadService::new(yard());

    let impact = service
        .estimate_impact(
            "Carga Norte",
            EstimateQuery {
                length: 12,
                piece_count: 100,
                package_count: Some(2),
            },
        )
        .await
        .unwrap();

    assert_eq!(impact.current.total_board_feet, dec("629.634"));
    assert_eq!(
        impact.simulated.total_board_feet,
        impact.current.total_board_feet + impact.added_board_feet
    );
    assert_eq!(impact.simulated.medium_board_feet, impact.added_board_feet);
    assert!(impact.simulated_progress > impact.current_progress);
}

#[tokio::test]
async fn test_estimate_rejects_empty_query() {
    let service = LoadService::new(yard());

    let result = service
        .estimate_impact(
            "Carga Norte",
            EstimateQuery {
                length: 12,
                piece_count: 0,
                package_count: None,
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_export_uses_load_figures() {
    let service = ExportService::new(LoadService::new(yard()));

    let file = service.export_load("Carga Norte").await.unwrap();

    assert_eq!(file.file_name, "Carga_Carga_Norte.csv");
    assert!(file.content.contains("Total PT,629.634"));
    assert!(file.content.contains("Paquetes,2"));
    assert!(file.content.contains("CORTOS (7-9),100,314.817"));
    assert!(!file.content.contains("PT-1272"));
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_group_balance_health() {
    let service = ReportService::new(yard());

    let groups = service.groups(&ReportFilter::default()).await.unwrap();

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].group, "Cortos (≤9')");
    assert!(groups.iter().all(|g| g.pct > Decimal::ZERO));
}

#[tokio::test]
async fn test_reversed_date_range_rejected() {
    let service = ReportService::new(yard());
    let filter = ReportFilter {
        from: chrono::NaiveDate::from_ymd_opt(2026, 5, 2),
        to: chrono::NaiveDate::from_ymd_opt(2026, 5, 1),
        ..ReportFilter::default()
    };

    assert!(service.production(&filter).await.is_err());
}

#[tokio::test]
async fn test_reports_filtered_by_load() {
    let service = ReportService::new(yard());
    let filter = ReportFilter {
        loads: vec!["Carga Norte".to_string()],
        ..ReportFilter::default()
    };

    let groups = service.groups(&filter).await.unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group, "Cortos (≤9')");
    assert_eq!(groups[0].pct, dec("50"));
    assert_eq!(groups[1].group, "Largos (13'+)");

    let production = service.production(&filter).await.unwrap();
    assert_eq!(production.kpis.package_count, 2);
    assert_eq!(production.kpis.total_board_feet, dec("629.634"));
    assert_eq!(production.kpis.piece_count, 150);

    let unfiltered = service.production(&ReportFilter::default()).await.unwrap();
    assert_eq!(unfiltered.kpis.package_count, 3);
}
