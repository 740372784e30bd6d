mod common;

use common::{
    insert_cad, insert_department, insert_mip, insert_project, CadSeed, MipSeed, ProjectSeed,
};
use efdash_core::repo::chart_repo::SqliteChartRepository;
use efdash_core::{open_db_in_memory, ChartService, Section3Filter, ServiceError, YearRange};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn seed(conn: &Connection) {
    insert_project(
        conn,
        ProjectSeed::new("Kenya", 2022, "1000")
            .file("kenya-22.pdf")
            .title("Water")
            .indirect("300"),
    );
    insert_project(
        conn,
        ProjectSeed::new("Kenya", 2026, "500")
            .file("kenya-26.pdf")
            .title("Roads")
            .indirect("100"),
    );
    insert_project(
        conn,
        ProjectSeed::new("Ghana", 2023, "2000")
            .file("ghana-23.pdf")
            .title("Water")
            .indirect("50"),
    );
    insert_project(conn, ProjectSeed::new("Ghana", 2019, "99999").title("Legacy"));

    for (filename, code, category) in [
        ("kenya-22.pdf", 14030, "Water"),
        ("kenya-26.pdf", 21020, "Transport"),
        ("ghana-23.pdf", 14030, "Water"),
    ] {
        insert_cad(
            conn,
            CadSeed {
                filename,
                code,
                name: if code == 14030 { "Water supply" } else { "Road transport" },
                category,
                department: None,
                priority_area: None,
            },
        );
    }

    insert_department(conn, 7, "Delegation Nairobi", "kenya-22.pdf");
    insert_department(conn, 7, "Delegation Nairobi", "kenya-26.pdf");
    insert_department(conn, 9, "Delegation Accra", "ghana-23.pdf");

    insert_mip(
        conn,
        MipSeed {
            p1: ["400", "100"],
            ..MipSeed::empty("Kenya")
        },
    );
    insert_mip(
        conn,
        MipSeed {
            p2: ["70", "30"],
            ..MipSeed::empty("Benin")
        },
    );
}

fn service(conn: &Connection) -> ChartService<SqliteChartRepository<'_>> {
    ChartService::new(SqliteChartRepository::new(conn))
}

#[test]
fn unfiltered_charts_cover_the_full_horizon() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let charts = service(&conn)
        .section3_charts(Section3Filter::default())
        .unwrap();

    let countries: Vec<_> = charts
        .top_countries
        .iter()
        .map(|row| (row.country.as_str(), row.engaged_amount, row.projected_amount))
        .collect();
    assert_eq!(
        countries,
        vec![
            ("Ghana", dec!(2000), dec!(0)),
            ("Kenya", dec!(1500), dec!(500)),
            ("Benin", dec!(0), dec!(100)),
        ]
    );

    let programs: Vec<_> = charts
        .top_programs
        .iter()
        .map(|row| (row.program.as_str(), row.total_amount))
        .collect();
    assert_eq!(programs, vec![("Water", dec!(3000)), ("Roads", dec!(500))]);

    let agencies: Vec<_> = charts
        .top_agencies
        .iter()
        .map(|row| (row.agency.as_str(), row.indirect_amount, row.project_count))
        .collect();
    assert_eq!(
        agencies,
        vec![
            ("Delegation Nairobi", dec!(400), 2),
            ("Delegation Accra", dec!(50), 1),
        ]
    );
    assert!(charts
        .top_programs
        .iter()
        .all(|row| row.year_range == YearRange::From2021To2027 && row.category == "All"));
}

#[test]
fn year_range_category_and_department_filters_apply() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let early = service(&conn)
        .section3_charts(Section3Filter {
            year_range: Some(YearRange::From2021To2024),
            ..Section3Filter::default()
        })
        .unwrap();
    let kenya = early
        .top_countries
        .iter()
        .find(|row| row.country == "Kenya")
        .unwrap();
    assert_eq!(kenya.engaged_amount, dec!(1000));
    assert_eq!(kenya.projected_amount, dec!(400));

    let transport = service(&conn)
        .section3_charts(Section3Filter {
            category: Some(" transport ".to_string()),
            ..Section3Filter::default()
        })
        .unwrap();
    assert_eq!(transport.top_countries.len(), 1);
    assert_eq!(transport.top_countries[0].country, "Kenya");
    assert_eq!(transport.top_countries[0].engaged_amount, dec!(500));
    assert_eq!(transport.top_countries[0].category, "transport");
    assert_eq!(transport.top_programs.len(), 1);

    let accra = service(&conn)
        .section3_charts(Section3Filter {
            department: Some(9),
            ..Section3Filter::default()
        })
        .unwrap();
    assert_eq!(accra.top_agencies.len(), 1);
    assert_eq!(accra.top_agencies[0].agency, "Delegation Accra");
}

#[test]
fn invalid_department_filter_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let err = service(&conn)
        .section3_charts(Section3Filter {
            department: Some(-3),
            ..Section3Filter::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn global_rankings_count_distinct_files() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    // second row for an already counted file
    insert_cad(
        &conn,
        CadSeed {
            filename: "kenya-22.pdf",
            code: 14030,
            name: "Water supply",
            category: "Water",
            department: None,
            priority_area: None,
        },
    );

    let service = service(&conn);
    let cad = service.global_top_cad().unwrap();
    assert_eq!(cad[0].cad_code, 14030);
    assert_eq!(cad[0].action_plan_count, 2);
    assert_eq!(cad[1].cad_code, 21020);
    assert_eq!(cad[1].action_plan_count, 1);

    let departments = service.global_top_departments().unwrap();
    assert_eq!(departments[0].department_id, 7);
    assert_eq!(departments[0].action_plan_count, 2);
    assert_eq!(departments[1].department_name, "Delegation Accra");
}
