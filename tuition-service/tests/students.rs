mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_student_starts_with_an_empty_breakdown() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let (status, _, student) = common::send(
        &app,
        "POST",
        "/api/students",
        Some(&cookie),
        Some(json!({
            "nama": "Ahmad Rizki",
            "kelas": "X TKJ 1",
            "nis": "2024001",
            "nisn": "0081234567",
            "alamat": "Cisauk",
            "namaOrangTua": "Budi Santoso",
            "status": "Mukim",
            "tahunAjaran": "2024/2025",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(student["nama"], "Ahmad Rizki");
    assert_eq!(student["totalBiaya"], 0);
    assert_eq!(student["terbayar"], 0);
    assert_eq!(student["tunggakan"], 0);
    assert!(student["rincianBiaya"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_nis_is_a_conflict() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
        .await;

    let (status, _, _) = common::send(
        &app,
        "POST",
        "/api/students",
        Some(&cookie),
        Some(json!({
            "nama": "Siti Nurhaliza",
            "kelas": "X AKL 1",
            "nis": "2024001",
            "nisn": "0087654321",
            "status": "Non Mukim",
            "tahunAjaran": "2024/2025",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_tahun_ajaran_is_rejected() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let (status, _, _) = common::send(
        &app,
        "POST",
        "/api/students",
        Some(&cookie),
        Some(json!({
            "nama": "Ahmad Rizki",
            "kelas": "X TKJ 1",
            "nis": "2024001",
            "nisn": "0081234567",
            "status": "Mukim",
            "tahunAjaran": "2024/2026",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn replacing_the_breakdown_rederives_the_aggregates() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student = common::create_test_student(
        &app,
        &cookie,
        "Ahmad Rizki",
        "2024001",
        "Mukim",
        json!([
            { "namaBiaya": "Uang Gedung", "jumlah": 1_000_000, "terbayar": 0 },
            { "namaBiaya": "Seragam", "jumlah": 500_000, "terbayar": 500_000 },
        ]),
    )
    .await;

    assert_eq!(student["totalBiaya"], 1_500_000);
    assert_eq!(student["terbayar"], 500_000);
    assert_eq!(student["tunggakan"], 1_000_000);

    let items = student["rincianBiaya"].as_array().unwrap();
    assert_eq!(items[0]["status"], "Belum Lunas");
    assert_eq!(items[0]["tunggakan"], 1_000_000);
    assert_eq!(items[1]["status"], "Lunas");
    assert_eq!(items[1]["tunggakan"], 0);
}

#[tokio::test]
async fn breakdown_item_paid_beyond_its_amount_is_rejected() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let (_, _, student) = common::send(
        &app,
        "POST",
        "/api/students",
        Some(&cookie),
        Some(json!({
            "nama": "Ahmad Rizki",
            "kelas": "X TKJ 1",
            "nis": "2024001",
            "nisn": "0081234567",
            "status": "Mukim",
            "tahunAjaran": "2024/2025",
        })),
    )
    .await;
    let id = student["id"].as_str().unwrap();

    let (status, _, _) = common::send(
        &app,
        "PUT",
        &format!("/api/students/{id}/rincian"),
        Some(&cookie),
        Some(json!([
            { "namaBiaya": "Uang Gedung", "jumlah": 100_000, "terbayar": 200_000 },
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_delete_student() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    let (status, _, updated) = common::send(
        &app,
        "PUT",
        &format!("/api/students/{id}"),
        Some(&cookie),
        Some(json!({
            "nama": "Ahmad Rizki",
            "kelas": "XI TKJ 1",
            "nis": "2024001",
            "nisn": "0081234567",
            "status": "Non Mukim",
            "tahunAjaran": "2025/2026",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["kelas"], "XI TKJ 1");
    assert_eq!(updated["status"], "Non Mukim");

    let (status, _, _) =
        common::send(&app, "DELETE", &format!("/api/students/{id}"), Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) =
        common::send(&app, "GET", &format!("/api/students/{id}"), Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
