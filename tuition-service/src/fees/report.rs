//! Report rollups: stateless sums over the current snapshots, recomputed per
//! request.

use crate::models::{InfaqRates, SppBulanan, Student, Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};
use csv::Writer;
use serde::{Deserialize, Serialize};

/// Optional narrowing applied before a rollup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilter {
    pub kelas: Option<String>,
    pub tahun_ajaran: Option<String>,
    pub status: Option<crate::models::StudentStatus>,
    pub search: Option<String>,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        if let Some(kelas) = &self.kelas {
            if &student.kelas != kelas {
                return false;
            }
        }
        if let Some(tahun) = &self.tahun_ajaran {
            if &student.tahun_ajaran != tahun {
                return false;
            }
        }
        if let Some(status) = self.status {
            if student.status != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let q = search.to_lowercase();
            if !q.is_empty()
                && !student.nama.to_lowercase().contains(&q)
                && !student.nis.to_lowercase().contains(&q)
                && !student.nisn.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Rollup of the itemized fee ledger across a student list.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecap {
    pub total_siswa: usize,
    pub total_biaya: i64,
    pub total_terbayar: i64,
    pub total_tunggakan: i64,
    pub siswa_lunas: usize,
    pub siswa_menunggak: usize,
    /// Rupiah collected as a percentage of rupiah expected.
    pub persentase_pelunasan: u32,
    /// Students fully paid as a percentage of all students.
    pub persentase_lunas: u32,
}

fn percentage(part: i64, whole: i64) -> u32 {
    if whole <= 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

pub fn payment_recap(students: &[&Student]) -> PaymentRecap {
    let total_biaya: i64 = students.iter().map(|s| s.total_biaya).sum();
    let total_terbayar: i64 = students.iter().map(|s| s.terbayar).sum();
    let total_tunggakan: i64 = students.iter().map(|s| s.tunggakan).sum();
    let siswa_lunas = students.iter().filter(|s| s.tunggakan == 0).count();
    let siswa_menunggak = students.iter().filter(|s| s.tunggakan > 0).count();

    PaymentRecap {
        total_siswa: students.len(),
        total_biaya,
        total_terbayar,
        total_tunggakan,
        siswa_lunas,
        siswa_menunggak,
        persentase_pelunasan: percentage(total_terbayar, total_biaya),
        persentase_lunas: percentage(siswa_lunas as i64, students.len() as i64),
    }
}

/// One student's row in the SPP recap: expected is a flat 12 months at the
/// standing rate, tunggakan clamped at zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SppRecapRow {
    pub siswa_id: String,
    pub nama: String,
    pub nis: String,
    pub kelas: String,
    pub tahun_ajaran: String,
    pub status: crate::models::StudentStatus,
    pub nominal_per_bulan: i64,
    pub total_terbayar: i64,
    pub total_tunggakan: i64,
    pub jumlah_pembayaran: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SppRecapTotals {
    pub total_siswa: usize,
    pub total_seharusnya: i64,
    pub total_terbayar: i64,
    pub total_tunggakan: i64,
    pub siswa_lunas: usize,
    pub siswa_belum_bayar: usize,
    pub persentase_lunas: u32,
}

pub fn spp_recap(
    students: &[&Student],
    rows: &[SppBulanan],
    rates: &InfaqRates,
) -> (Vec<SppRecapRow>, SppRecapTotals) {
    let recap_rows: Vec<SppRecapRow> = students
        .iter()
        .map(|student| {
            let payments: Vec<&SppBulanan> =
                rows.iter().filter(|r| r.siswa_id == student.id).collect();
            let total_terbayar: i64 = payments.iter().map(|r| r.terbayar).sum();
            let nominal_per_bulan = rates.for_status(student.status);
            let expected = 12 * nominal_per_bulan;

            SppRecapRow {
                siswa_id: student.id.clone(),
                nama: student.nama.clone(),
                nis: student.nis.clone(),
                kelas: student.kelas.clone(),
                tahun_ajaran: student.tahun_ajaran.clone(),
                status: student.status,
                nominal_per_bulan,
                total_terbayar,
                total_tunggakan: (expected - total_terbayar).max(0),
                jumlah_pembayaran: payments.len(),
            }
        })
        .collect();

    let total_terbayar: i64 = recap_rows.iter().map(|r| r.total_terbayar).sum();
    let total_tunggakan: i64 = recap_rows.iter().map(|r| r.total_tunggakan).sum();
    let siswa_lunas = recap_rows.iter().filter(|r| r.total_tunggakan == 0).count();
    let siswa_belum_bayar = recap_rows.iter().filter(|r| r.total_terbayar == 0).count();

    let totals = SppRecapTotals {
        total_siswa: recap_rows.len(),
        total_seharusnya: total_terbayar + total_tunggakan,
        total_terbayar,
        total_tunggakan,
        siswa_lunas,
        siswa_belum_bayar,
        persentase_lunas: percentage(siswa_lunas as i64, recap_rows.len() as i64),
    };

    (recap_rows, totals)
}

/// Time window for cashflow rollups, all relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashflowPeriod {
    Harian,
    Bulanan,
    Tahunan,
    Semua,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    pub pemasukan: i64,
    pub pengeluaran: i64,
    pub saldo: i64,
}

pub fn cashflow(
    transactions: &[Transaction],
    period: CashflowPeriod,
    reference: NaiveDate,
) -> CashflowSummary {
    let in_window = |t: &&Transaction| match period {
        CashflowPeriod::Harian => t.tanggal == reference,
        CashflowPeriod::Bulanan => {
            t.tanggal.year() == reference.year() && t.tanggal.month() == reference.month()
        }
        CashflowPeriod::Tahunan => t.tanggal.year() == reference.year(),
        CashflowPeriod::Semua => true,
    };

    let pemasukan: i64 = transactions
        .iter()
        .filter(in_window)
        .filter(|t| t.tipe == TransactionType::Pemasukan)
        .map(|t| t.jumlah)
        .sum();
    let pengeluaran: i64 = transactions
        .iter()
        .filter(in_window)
        .filter(|t| t.tipe == TransactionType::Pengeluaran)
        .map(|t| t.jumlah)
        .sum();

    CashflowSummary {
        pemasukan,
        pengeluaran,
        saldo: pemasukan - pengeluaran,
    }
}

/// CSV export of the fee recap, RFC-4180 quoting via the csv crate.
pub fn rekap_csv(students: &[&Student]) -> Result<String, csv::Error> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record([
        "No",
        "Nama Siswa",
        "NIS",
        "Kelas",
        "Tahun Ajaran",
        "Status",
        "Total Biaya",
        "Terbayar",
        "Tunggakan",
    ])?;

    for (index, student) in students.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            student.nama.clone(),
            student.nis.clone(),
            student.kelas.clone(),
            student.tahun_ajaran.clone(),
            student.status.as_str().to_string(),
            student.total_biaya.to_string(),
            student.terbayar.to_string(),
            student.tunggakan.to_string(),
        ])?;
    }

    let recap = payment_recap(students);
    writer.write_record([
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        recap.total_biaya.to_string(),
        recap.total_terbayar.to_string(),
        recap.total_tunggakan.to_string(),
    ])?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
