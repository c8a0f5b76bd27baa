//! Monthly dues (SPP / infaq bulanan) models.

use super::StudentStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settlement status of one month's dues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SppStatus {
    Lunas,
    Sebagian,
    #[serde(rename = "Belum Lunas")]
    BelumLunas,
}

impl SppStatus {
    /// Lunas iff nothing is outstanding, Sebagian iff partially paid.
    pub fn derive(jumlah: i64, terbayar: i64) -> Self {
        if terbayar >= jumlah {
            SppStatus::Lunas
        } else if terbayar > 0 {
            SppStatus::Sebagian
        } else {
            SppStatus::BelumLunas
        }
    }
}

/// A recorded month of SPP for one student. Months without a record are
/// synthesized on read as fully outstanding (see `fees::calendar`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SppBulanan {
    pub id: String,
    pub siswa_id: String,
    pub nama_siswa: String,
    pub nis: String,
    pub kelas: String,
    pub status: StudentStatus,
    /// Two-digit month code, "01" through "12".
    pub bulan: String,
    pub tahun_ajaran: String,
    #[serde(rename = "jumlahSPP")]
    pub jumlah_spp: i64,
    pub terbayar: i64,
    pub tunggakan: i64,
    pub status_pembayaran: SppStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_bayar: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

impl SppBulanan {
    /// Recompute the derived fields from `jumlah_spp` and `terbayar`.
    pub fn rederive(&mut self) {
        self.tunggakan = self.jumlah_spp - self.terbayar;
        self.status_pembayaran = SppStatus::derive(self.jumlah_spp, self.terbayar);
    }
}

fn validate_bulan(bulan: &str) -> Result<(), validator::ValidationError> {
    let valid = bulan.len() == 2 && matches!(bulan.parse::<u8>(), Ok(1..=12));
    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("bulan"))
    }
}

/// Input for recording a month's SPP payment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSppPayment {
    #[validate(length(min = 1, message = "siswa wajib dipilih"))]
    pub siswa_id: String,
    #[validate(custom(function = validate_bulan, message = "bulan harus 01..12"))]
    pub bulan: String,
    #[validate(range(min = 1, message = "nominal harus positif"))]
    pub nominal: i64,
    pub tanggal_bayar: NaiveDate,
    #[serde(default)]
    pub keterangan: Option<String>,
}

/// Input for editing a recorded SPP payment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSppPayment {
    #[validate(custom(function = validate_bulan, message = "bulan harus 01..12"))]
    pub bulan: String,
    #[validate(range(min = 1, message = "nominal harus positif"))]
    pub nominal: i64,
    #[validate(range(min = 0, message = "terbayar tidak boleh negatif"))]
    pub terbayar: i64,
    pub tanggal_bayar: Option<NaiveDate>,
    #[serde(default)]
    pub keterangan: Option<String>,
}

/// The standing default monthly rates, keyed by residency status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfaqRates {
    pub mukim: i64,
    pub non_mukim: i64,
}

impl Default for InfaqRates {
    fn default() -> Self {
        Self {
            mukim: 600_000,
            non_mukim: 400_000,
        }
    }
}

impl InfaqRates {
    pub fn for_status(&self, status: StudentStatus) -> i64 {
        match status {
            StudentStatus::Mukim => self.mukim,
            StudentStatus::NonMukim => self.non_mukim,
        }
    }
}
