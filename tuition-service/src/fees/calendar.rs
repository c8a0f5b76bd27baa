//! The SPP school-year calendar: an academic year "YYYY/YYYY" spans July of
//! the start year through June of the end year. Months without a recorded
//! payment are synthesized as fully outstanding at the standing rate.

use crate::models::{InfaqRates, SppBulanan, SppStatus, Student};
use serde::Serialize;
use thiserror::Error;

pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Indonesian month name for a two-digit month code.
pub fn month_name(bulan: &str) -> Option<&'static str> {
    let idx: usize = bulan.parse().ok()?;
    MONTH_NAMES.get(idx.checked_sub(1)?).copied()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AcademicYearError {
    #[error("tahun ajaran '{0}' tidak berformat YYYY/YYYY")]
    Malformed(String),
    #[error("tahun ajaran '{0}' harus dua tahun berurutan")]
    NonConsecutive(String),
}

/// A validated academic year, e.g. 2024/2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYear {
    pub start: i32,
    pub end: i32,
}

impl AcademicYear {
    pub fn parse(raw: &str) -> Result<Self, AcademicYearError> {
        let malformed = || AcademicYearError::Malformed(raw.to_string());
        let (start, end) = raw.split_once('/').ok_or_else(malformed)?;
        if start.len() != 4 || end.len() != 4 {
            return Err(malformed());
        }
        let start: i32 = start.parse().map_err(|_| malformed())?;
        let end: i32 = end.parse().map_err(|_| malformed())?;
        if end != start + 1 {
            return Err(AcademicYearError::NonConsecutive(raw.to_string()));
        }
        Ok(Self { start, end })
    }

    /// The twelve (month code, calendar year) pairs of the school year,
    /// July first.
    pub fn months(&self) -> [(&'static str, i32); 12] {
        [
            ("07", self.start),
            ("08", self.start),
            ("09", self.start),
            ("10", self.start),
            ("11", self.start),
            ("12", self.start),
            ("01", self.end),
            ("02", self.end),
            ("03", self.end),
            ("04", self.end),
            ("05", self.end),
            ("06", self.end),
        ]
    }
}

impl std::fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

/// One month-slot of a student's SPP year, either backed by a recorded
/// payment or synthesized with the default rate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSlot {
    pub bulan: String,
    pub tahun: i32,
    pub nama_bulan: String,
    pub nominal_harus_bayar: i64,
    pub terbayar: i64,
    pub tunggakan: i64,
    pub status: SppStatus,
    /// Id of the backing `SppBulanan` row, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Totals across a student's twelve month-slots.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SppSummary {
    pub total_harus_bayar: i64,
    pub total_terbayar: i64,
    pub total_tunggakan: i64,
}

/// Materialize the twelve month-slots for one student. `rows` is the full
/// SPP collection; only rows matching (siswaId, bulan, tahunAjaran) project
/// into slots.
pub fn month_slots(
    student: &Student,
    rows: &[SppBulanan],
    rates: &InfaqRates,
) -> Result<Vec<MonthSlot>, AcademicYearError> {
    let year = AcademicYear::parse(&student.tahun_ajaran)?;
    let default_rate = rates.for_status(student.status);

    let slots = year
        .months()
        .iter()
        .map(|&(bulan, tahun)| {
            let existing = rows.iter().find(|row| {
                row.siswa_id == student.id
                    && row.bulan == bulan
                    && row.tahun_ajaran == student.tahun_ajaran
            });

            let nama_bulan = month_name(bulan).unwrap_or_default().to_string();
            match existing {
                Some(row) => MonthSlot {
                    bulan: bulan.to_string(),
                    tahun,
                    nama_bulan,
                    nominal_harus_bayar: row.jumlah_spp,
                    terbayar: row.terbayar,
                    tunggakan: row.jumlah_spp - row.terbayar,
                    status: row.status_pembayaran,
                    record_id: Some(row.id.clone()),
                },
                None => MonthSlot {
                    bulan: bulan.to_string(),
                    tahun,
                    nama_bulan,
                    nominal_harus_bayar: default_rate,
                    terbayar: 0,
                    tunggakan: default_rate,
                    status: SppStatus::BelumLunas,
                    record_id: None,
                },
            }
        })
        .collect();

    Ok(slots)
}

/// Sum the twelve slots. No carry-forward or late-fee logic exists.
pub fn summarize(slots: &[MonthSlot]) -> SppSummary {
    SppSummary {
        total_harus_bayar: slots.iter().map(|s| s.nominal_harus_bayar).sum(),
        total_terbayar: slots.iter().map(|s| s.terbayar).sum(),
        total_tunggakan: slots.iter().map(|s| s.tunggakan).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentStatus;

    fn student(status: StudentStatus, tahun_ajaran: &str) -> Student {
        Student {
            id: "S-1".to_string(),
            nama: "Ahmad Rizki".to_string(),
            kelas: "X TKJ 1".to_string(),
            nis: "2024001".to_string(),
            nisn: "0081234567".to_string(),
            alamat: String::new(),
            nama_orang_tua: String::new(),
            status,
            tahun_ajaran: tahun_ajaran.to_string(),
            total_biaya: 0,
            terbayar: 0,
            tunggakan: 0,
            rincian_biaya: vec![],
        }
    }

    fn spp_row(bulan: &str, jumlah: i64, terbayar: i64) -> SppBulanan {
        let mut row = SppBulanan {
            id: format!("SPP-{bulan}"),
            siswa_id: "S-1".to_string(),
            nama_siswa: "Ahmad Rizki".to_string(),
            nis: "2024001".to_string(),
            kelas: "X TKJ 1".to_string(),
            status: StudentStatus::Mukim,
            bulan: bulan.to_string(),
            tahun_ajaran: "2024/2025".to_string(),
            jumlah_spp: jumlah,
            terbayar,
            tunggakan: 0,
            status_pembayaran: SppStatus::BelumLunas,
            tanggal_bayar: None,
            keterangan: None,
        };
        row.rederive();
        row
    }

    #[test]
    fn academic_year_parses_and_rejects() {
        assert_eq!(
            AcademicYear::parse("2024/2025"),
            Ok(AcademicYear {
                start: 2024,
                end: 2025
            })
        );
        assert!(matches!(
            AcademicYear::parse("2024"),
            Err(AcademicYearError::Malformed(_))
        ));
        assert!(matches!(
            AcademicYear::parse("abcd/efgh"),
            Err(AcademicYearError::Malformed(_))
        ));
        assert!(matches!(
            AcademicYear::parse("2024/2026"),
            Err(AcademicYearError::NonConsecutive(_))
        ));
    }

    #[test]
    fn synthesized_year_spans_july_through_june() {
        let student = student(StudentStatus::Mukim, "2024/2025");
        let rates = InfaqRates::default();
        let slots = month_slots(&student, &[], &rates).unwrap();

        assert_eq!(slots.len(), 12);
        assert_eq!((slots[0].bulan.as_str(), slots[0].tahun), ("07", 2024));
        assert_eq!((slots[11].bulan.as_str(), slots[11].tahun), ("06", 2025));
        for slot in &slots {
            assert_eq!(slot.nominal_harus_bayar, 600_000);
            assert_eq!(slot.terbayar, 0);
            assert_eq!(slot.status, SppStatus::BelumLunas);
            assert!(slot.record_id.is_none());
        }
    }

    #[test]
    fn non_mukim_slots_use_non_mukim_rate() {
        let student = student(StudentStatus::NonMukim, "2024/2025");
        let slots = month_slots(&student, &[], &InfaqRates::default()).unwrap();
        assert!(slots.iter().all(|s| s.nominal_harus_bayar == 400_000));
    }

    #[test]
    fn recorded_months_project_into_their_slot() {
        let student = student(StudentStatus::Mukim, "2024/2025");
        let rows = vec![
            spp_row("07", 500_000, 500_000),
            spp_row("08", 500_000, 250_000),
            spp_row("09", 500_000, 0),
        ];
        let slots = month_slots(&student, &rows, &InfaqRates::default()).unwrap();

        assert_eq!(slots[0].status, SppStatus::Lunas);
        assert_eq!(slots[0].tunggakan, 0);
        assert_eq!(slots[1].status, SppStatus::Sebagian);
        assert_eq!(slots[1].tunggakan, 250_000);
        assert_eq!(slots[2].status, SppStatus::BelumLunas);
        // October onwards falls back to the default rate
        assert_eq!(slots[3].nominal_harus_bayar, 600_000);
    }

    #[test]
    fn summary_sums_the_twelve_slots() {
        let student = student(StudentStatus::Mukim, "2024/2025");
        let rows = vec![spp_row("07", 600_000, 600_000)];
        let slots = month_slots(&student, &rows, &InfaqRates::default()).unwrap();
        let summary = summarize(&slots);

        assert_eq!(summary.total_harus_bayar, 12 * 600_000);
        assert_eq!(summary.total_terbayar, 600_000);
        assert_eq!(summary.total_tunggakan, 11 * 600_000);
    }

    #[test]
    fn malformed_year_is_a_typed_error() {
        let student = student(StudentStatus::Mukim, "2024-2025");
        let err = month_slots(&student, &[], &InfaqRates::default()).unwrap_err();
        assert!(matches!(err, AcademicYearError::Malformed(_)));
    }
}
