mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn month_view_synthesizes_the_full_school_year() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    let (status, _, view) = common::send(
        &app,
        "GET",
        &format!("/api/students/{id}/spp"),
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["nominalPerBulan"], 600_000);

    let slots = view["bulan"].as_array().unwrap();
    assert_eq!(slots.len(), 12);
    assert_eq!(slots[0]["bulan"], "07");
    assert_eq!(slots[0]["tahun"], 2024);
    assert_eq!(slots[0]["namaBulan"], "Juli");
    assert_eq!(slots[11]["bulan"], "06");
    assert_eq!(slots[11]["tahun"], 2025);
    assert!(slots.iter().all(|s| s["status"] == "Belum Lunas"));

    assert_eq!(view["ringkasan"]["totalHarusBayar"], 12 * 600_000);
    assert_eq!(view["ringkasan"]["totalTunggakan"], 12 * 600_000);
}

#[tokio::test]
async fn non_mukim_students_get_the_lower_default_rate() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student = common::create_test_student(
        &app,
        &cookie,
        "Siti Nurhaliza",
        "2024002",
        "Non Mukim",
        json!([]),
    )
    .await;
    let id = student["id"].as_str().unwrap();

    let (_, _, view) = common::send(
        &app,
        "GET",
        &format!("/api/students/{id}/spp"),
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(view["nominalPerBulan"], 400_000);
}

#[tokio::test]
async fn recording_a_payment_settles_the_month_and_books_income() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    let (status, _, row) = common::send(
        &app,
        "POST",
        "/api/spp",
        Some(&cookie),
        Some(json!({
            "siswaId": id,
            "bulan": "07",
            "nominal": 600_000,
            "tanggalBayar": "2024-07-05",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(row["statusPembayaran"], "Lunas");
    assert_eq!(row["jumlahSPP"], 600_000);
    assert_eq!(row["terbayar"], 600_000);
    assert_eq!(row["tunggakan"], 0);

    // The month now projects as settled in the twelve-month view.
    let (_, _, view) = common::send(
        &app,
        "GET",
        &format!("/api/students/{id}/spp"),
        Some(&cookie),
        None,
    )
    .await;
    let slots = view["bulan"].as_array().unwrap();
    assert_eq!(slots[0]["bulan"], "07");
    assert_eq!(slots[0]["status"], "Lunas");
    assert_eq!(view["ringkasan"]["totalTerbayar"], 600_000);

    // A matching income entry lands in the transaction ledger.
    let (_, _, transactions) =
        common::send(&app, "GET", "/api/transactions", Some(&cookie), None).await;
    let transactions = transactions.as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["tipe"], "Pemasukan");
    assert_eq!(transactions[0]["jumlah"], 600_000);
    assert_eq!(transactions[0]["kategori"], "SPP Mukim - Juli 2024/2025");
}

#[tokio::test]
async fn recording_the_same_month_twice_is_a_conflict() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    let payload = json!({
        "siswaId": id,
        "bulan": "08",
        "nominal": 600_000,
        "tanggalBayar": "2024-08-03",
    });

    let (status, _, _) =
        common::send(&app, "POST", "/api/spp", Some(&cookie), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = common::send(&app, "POST", "/api/spp", Some(&cookie), Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn editing_a_payment_rederives_its_status() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    let (_, _, row) = common::send(
        &app,
        "POST",
        "/api/spp",
        Some(&cookie),
        Some(json!({
            "siswaId": id,
            "bulan": "07",
            "nominal": 600_000,
            "tanggalBayar": "2024-07-05",
        })),
    )
    .await;
    let row_id = row["id"].as_str().unwrap();

    let (status, _, updated) = common::send(
        &app,
        "PUT",
        &format!("/api/spp/{row_id}"),
        Some(&cookie),
        Some(json!({
            "bulan": "07",
            "nominal": 600_000,
            "terbayar": 250_000,
            "tanggalBayar": "2024-07-05",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["statusPembayaran"], "Sebagian");
    assert_eq!(updated["tunggakan"], 350_000);
}

#[tokio::test]
async fn invalid_month_code_is_rejected() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    let (status, _, _) = common::send(
        &app,
        "POST",
        "/api/spp",
        Some(&cookie),
        Some(json!({
            "siswaId": id,
            "bulan": "13",
            "nominal": 600_000,
            "tanggalBayar": "2024-07-05",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn changed_rates_apply_to_unrecorded_months_only() {
    let (app, _data_dir) = common::spawn_app().await;
    let cookie = common::login(&app).await;

    let student =
        common::create_test_student(&app, &cookie, "Ahmad Rizki", "2024001", "Mukim", json!([]))
            .await;
    let id = student["id"].as_str().unwrap();

    common::send(
        &app,
        "POST",
        "/api/spp",
        Some(&cookie),
        Some(json!({
            "siswaId": id,
            "bulan": "07",
            "nominal": 600_000,
            "tanggalBayar": "2024-07-05",
        })),
    )
    .await;

    let (status, _, _) = common::send(
        &app,
        "PUT",
        "/api/settings/infaq",
        Some(&cookie),
        Some(json!({ "mukim": 700_000, "nonMukim": 450_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, view) = common::send(
        &app,
        "GET",
        &format!("/api/students/{id}/spp"),
        Some(&cookie),
        None,
    )
    .await;
    let slots = view["bulan"].as_array().unwrap();
    // The recorded July keeps its booked nominal; August picks up the new rate.
    assert_eq!(slots[0]["nominalHarusBayar"], 600_000);
    assert_eq!(slots[1]["nominalHarusBayar"], 700_000);
}
