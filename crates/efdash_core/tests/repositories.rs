mod common;

use common::{
    insert_cad, insert_department, insert_mip, insert_project, CadSeed, MipSeed, ProjectSeed,
};
use efdash_core::repo::cad_repo::SqliteCadRepository;
use efdash_core::repo::chart_repo::{ChartRepository, SqliteChartRepository};
use efdash_core::repo::mip_repo::SqliteMipRepository;
use efdash_core::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use efdash_core::{open_db_in_memory, CadService, MipService, ProjectService, ServiceError};
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn project_reads_by_id_guid_country_and_year() {
    let conn = open_db_in_memory().unwrap();
    let kenya = insert_project(
        &conn,
        ProjectSeed::new(" Kenya ", 2022, "1,500.25")
            .title("Green jobs")
            .indirect("12,000"),
    );
    insert_project(&conn, ProjectSeed::new("Ghana", 2025, "900"));
    let repo = SqliteProjectRepository::new(&conn);

    let project = repo.get_project(kenya).unwrap().unwrap();
    assert_eq!(project.total_amount, Some(dec!(1500.25)));
    assert_eq!(project.indirect_amount(), dec!(12000));
    assert_eq!(project.year, Some(2022));

    let by_guid = repo.get_project_by_guid(project.project_guid).unwrap().unwrap();
    assert_eq!(by_guid.id, kenya);
    assert!(repo.get_project_by_guid(Uuid::new_v4()).unwrap().is_none());

    assert_eq!(repo.list_projects().unwrap().len(), 2);
    assert_eq!(repo.list_projects_by_country("kenya").unwrap().len(), 1);
    assert_eq!(repo.list_projects_by_year(2025).unwrap().len(), 1);
    assert!(repo.get_project(999).unwrap().is_none());
}

#[test]
fn project_service_validates_input_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::new(&conn));

    assert!(matches!(service.get_project(0), Err(ServiceError::Validation(_))));
    assert!(matches!(service.get_project(42), Err(ServiceError::NotFound(_))));
    assert!(matches!(
        service.list_projects_by_country(" "),
        Err(ServiceError::Validation(_))
    ));
    assert!(matches!(
        service.list_projects_by_year(-1),
        Err(ServiceError::Validation(_))
    ));
    assert!(service.list_projects_by_year(2022).unwrap().is_empty());
}

#[test]
fn invalid_guid_in_storage_is_reported_as_data_source_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO PROJECTS (PROJECTGUID, COUNTRY, YEAR) VALUES ('not-a-guid', 'Kenya', 2022);",
        [],
    )
    .unwrap();
    let service = ProjectService::new(SqliteProjectRepository::new(&conn));

    let err = service.list_projects().unwrap_err();
    assert!(matches!(err, ServiceError::DataSource(_)));
    assert!(err.to_string().contains("PROJECTGUID"));
}

#[test]
fn cad_reads_filter_by_category_and_department() {
    let conn = open_db_in_memory().unwrap();
    let first = insert_cad(
        &conn,
        CadSeed {
            filename: "kenya.pdf",
            code: 11110,
            name: "Education policy",
            category: "Education",
            department: Some(2),
            priority_area: Some(1),
        },
    );
    insert_cad(
        &conn,
        CadSeed {
            filename: "ghana.pdf",
            code: 21020,
            name: "Road transport",
            category: "Transport",
            department: Some(5),
            priority_area: Some(4),
        },
    );
    let service = CadService::new(SqliteCadRepository::new(&conn));

    let cad = service.get_cad_data(first).unwrap();
    assert_eq!(cad.code_cad, Some(11110));
    assert_eq!(cad.priority_areas, Some(1));
    assert_eq!(service.get_cad_data_by_guid(cad.cad_guid).unwrap().id, first);

    assert_eq!(service.list_cad_data().unwrap().len(), 2);
    assert_eq!(service.list_cad_data_by_category(" education ").unwrap().len(), 1);
    assert_eq!(service.list_cad_data_by_department(5).unwrap().len(), 1);
    assert!(matches!(
        service.list_cad_data_by_department(0),
        Err(ServiceError::Validation(_))
    ));
    assert!(matches!(
        service.list_cad_data_by_category(""),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn cad_list_is_newest_first() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO CAD (CAD_GUID, CODE_CAD, CREATED_DATE) VALUES
            ('0b6f5b52-4f0a-4d7e-9b1e-8f3f4d7d2a01', 1, '2023-01-01T00:00:00'),
            ('0b6f5b52-4f0a-4d7e-9b1e-8f3f4d7d2a02', 2, '2024-06-01T00:00:00');",
    )
    .unwrap();
    let service = CadService::new(SqliteCadRepository::new(&conn));

    let codes: Vec<Option<i64>> = service
        .list_cad_data()
        .unwrap()
        .into_iter()
        .map(|cad| cad.code_cad)
        .collect();
    assert_eq!(codes, vec![Some(2), Some(1)]);
}

#[test]
fn mip_reads_expose_typed_areas() {
    let conn = open_db_in_memory().unwrap();
    let id = insert_mip(
        &conn,
        MipSeed {
            titles: [Some("Green"), None, None],
            p1: ["1000", "250"],
            support: ["10", "5"],
            ..MipSeed::empty("Kenya")
        },
    );
    let service = MipService::new(SqliteMipRepository::new(&conn));

    let row = service.get_mip_data(id).unwrap();
    assert_eq!(row.p1.title.as_deref(), Some("Green"));
    assert_eq!(row.p1.period_21_24.amount, Some(dec!(1000)));
    assert_eq!(row.support_measures.period_25_27.amount, Some(dec!(5)));
    assert_eq!(service.get_mip_data_by_guid(row.mip_guid).unwrap().id, id);
    assert_eq!(service.list_mip_data_by_country("KENYA").unwrap().len(), 1);
    assert_eq!(service.list_mip_data().unwrap().len(), 1);
    assert!(matches!(service.get_mip_data(7), Err(ServiceError::NotFound(_))));
    assert!(matches!(
        service.list_mip_data_by_country("\t"),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn lookup_lists_are_distinct_sorted_and_skip_blanks() {
    let conn = open_db_in_memory().unwrap();
    insert_project(&conn, ProjectSeed::new("kenya", 2022, "1"));
    insert_project(&conn, ProjectSeed::new("Ghana ", 2022, "1"));
    insert_project(&conn, ProjectSeed::new("   ", 2022, "1"));
    insert_mip(&conn, MipSeed::empty("Benin"));
    insert_mip(&conn, MipSeed::empty("Ghana"));
    insert_department(&conn, 2, "DG INTPA", "kenya.pdf");
    insert_department(&conn, 2, "DG INTPA", "ghana.pdf");
    insert_department(&conn, 1, "Delegation", "ghana.pdf");
    insert_cad(
        &conn,
        CadSeed {
            filename: "kenya.pdf",
            code: 1,
            name: "x",
            category: "Water",
            department: None,
            priority_area: None,
        },
    );
    let repo = SqliteChartRepository::new(&conn);

    assert_eq!(repo.distinct_countries().unwrap(), vec!["Benin", "Ghana", "kenya"]);
    assert_eq!(repo.distinct_departments().unwrap(), vec!["Delegation", "DG INTPA"]);
    assert_eq!(repo.distinct_cad_categories().unwrap(), vec!["Water"]);
}
