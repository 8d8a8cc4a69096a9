use std::sync::Arc;

use super::common::*;
use crate::backend::FetchError;
use crate::workflows::directory::repository::EmployeeQuery;
use crate::workflows::directory::search::SearchNotice;
use crate::workflows::directory::DirectoryService;
use crate::workflows::ids::{EmployeeId, EmployerId};

#[tokio::test]
async fn employers_exclude_admin_accounts() {
    let (service, _) = loaded_service().await;

    let index = service.employers();
    assert_eq!(employer_ids(index.records()), vec![8, 7]);
    assert!(index.records().iter().all(|row| !row.is_admin()));

    let outcome = service.search_employers("agency");
    assert_eq!(outcome.matched, 0);
}

#[tokio::test]
async fn refresh_uses_configured_employee_query() {
    let (service, source) = loaded_service().await;
    assert_eq!(source.queries(), vec![EmployeeQuery::with_limit(200)]);
    assert_eq!(service.default_query().limit, Some(200));

    let narrowed = EmployeeQuery {
        role: Some("driver".to_string()),
        ..EmployeeQuery::default()
    };
    service
        .load_employees(&narrowed)
        .await
        .expect("load succeeds");
    assert_eq!(source.queries().last(), Some(&narrowed));
}

#[tokio::test]
async fn search_runs_against_loaded_snapshot() {
    let (service, _) = loaded_service().await;

    let outcome = service.search_employees("john manager");
    assert_eq!(employee_ids(&outcome.rows), vec![1]);
    assert_eq!(outcome.notice, SearchNotice::Found { count: 1 });
    assert_eq!(outcome.total, 4);

    let outcome = service.search_employees("");
    assert_eq!(outcome.matched, 4);
}

#[tokio::test]
async fn failed_reload_keeps_previous_records() {
    let (service, source) = loaded_service().await;
    source.fail_with(FetchError::Timeout { seconds: 60 });

    let err = service
        .refresh_employees()
        .await
        .expect_err("reload fails");
    assert_eq!(err, FetchError::Timeout { seconds: 60 });
    assert!(err.to_string().contains("taking too long"));
    assert_eq!(service.employees().len(), 4);

    assert!(service.load_employers().await.is_err());
    assert_eq!(service.employers().len(), 2);
}

#[tokio::test]
async fn nothing_loaded_reports_loading_notice() {
    let source = Arc::new(MemoryDirectory::seeded());
    let service = DirectoryService::new(source, EmployeeQuery::default());

    let outcome = service.search_employees("john");
    assert_eq!(outcome.notice, SearchNotice::Loading);
    assert!(outcome.rows.is_empty());
}

#[tokio::test]
async fn dashboard_stats_pass_through() {
    let (service, source) = loaded_service().await;
    let stats = service.dashboard_stats().await.expect("stats load");
    assert_eq!(stats.active_companies, 2);
    assert_eq!(source.stats_calls(), 1);
}

#[tokio::test]
async fn deleted_employee_leaves_the_index() {
    let (service, source) = loaded_service().await;

    service
        .delete_employee(EmployeeId(3))
        .await
        .expect("delete succeeds");

    assert_eq!(employee_ids(service.employees().records()), vec![1, 2, 4]);
    assert_eq!(employee_ids(&service.search_employees("john").rows), vec![1]);
    assert_eq!(source.deletes(), 1);
}

#[tokio::test]
async fn refused_delete_keeps_the_index() {
    let (service, source) = loaded_service().await;
    source.fail_with(FetchError::Backend("database offline".to_string()));

    let err = service
        .delete_employee(EmployeeId(1))
        .await
        .expect_err("backend refuses");
    assert_eq!(err, FetchError::Backend("database offline".to_string()));
    assert_eq!(service.employees().len(), 4);

    source.clear_failure();
    let err = service
        .delete_employee(EmployeeId(99))
        .await
        .expect_err("unknown applicant");
    assert_eq!(err.to_string(), "Employee not found");
    assert_eq!(service.employees().len(), 4);
}

#[tokio::test]
async fn deleted_employer_leaves_the_index() {
    let (service, _) = loaded_service().await;

    service
        .delete_employer(EmployerId(8))
        .await
        .expect("delete succeeds");
    assert_eq!(employer_ids(service.employers().records()), vec![7]);

    let err = service
        .delete_employer(EmployerId(9))
        .await
        .expect_err("admin accounts are protected");
    assert_eq!(err.to_string(), "Cannot delete admin accounts");
    assert_eq!(service.employers().len(), 1);
}
