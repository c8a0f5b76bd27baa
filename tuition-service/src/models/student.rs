//! Student and itemized fee (rincian biaya) models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Residency status. Each status carries its own default monthly SPP rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Mukim,
    #[serde(rename = "Non Mukim")]
    NonMukim,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Mukim => "Mukim",
            StudentStatus::NonMukim => "Non Mukim",
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement status of a single fee line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Lunas,
    #[serde(rename = "Belum Lunas")]
    BelumLunas,
}

impl ItemStatus {
    /// Paid in full iff nothing is outstanding.
    pub fn derive(tunggakan: i64) -> Self {
        if tunggakan <= 0 {
            ItemStatus::Lunas
        } else {
            ItemStatus::BelumLunas
        }
    }
}

/// One line of a student's itemized fee breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiayaItem {
    pub id: String,
    pub nama_biaya: String,
    pub jumlah: i64,
    pub terbayar: i64,
    pub tunggakan: i64,
    pub status: ItemStatus,
}

impl BiayaItem {
    pub fn new(nama_biaya: impl Into<String>, jumlah: i64, terbayar: i64) -> Self {
        let mut item = Self {
            id: format!("BIAYA-{}", Uuid::new_v4()),
            nama_biaya: nama_biaya.into(),
            jumlah,
            terbayar,
            tunggakan: 0,
            status: ItemStatus::BelumLunas,
        };
        item.rederive();
        item
    }

    /// Recompute the derived fields from `jumlah` and `terbayar`.
    pub fn rederive(&mut self) {
        self.tunggakan = self.jumlah - self.terbayar;
        self.status = ItemStatus::derive(self.tunggakan);
    }
}

/// Student record. The three money fields are denormalized aggregates and are
/// always rederived from `rincian_biaya`; they are never mutated directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub nama: String,
    pub kelas: String,
    pub nis: String,
    pub nisn: String,
    pub alamat: String,
    pub nama_orang_tua: String,
    pub status: StudentStatus,
    pub tahun_ajaran: String,
    pub total_biaya: i64,
    pub terbayar: i64,
    pub tunggakan: i64,
    /// Old snapshots may lack this field entirely; coerce to empty on load.
    #[serde(default)]
    pub rincian_biaya: Vec<BiayaItem>,
}

/// Input for registering a student.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "nama wajib diisi"))]
    pub nama: String,
    #[validate(length(min = 1, message = "kelas wajib diisi"))]
    pub kelas: String,
    #[validate(length(min = 1, message = "NIS wajib diisi"))]
    pub nis: String,
    #[validate(length(min = 1, message = "NISN wajib diisi"))]
    pub nisn: String,
    #[serde(default)]
    pub alamat: String,
    #[serde(default)]
    pub nama_orang_tua: String,
    pub status: StudentStatus,
    #[validate(length(min = 9, max = 9, message = "tahun ajaran harus berformat YYYY/YYYY"))]
    pub tahun_ajaran: String,
}

/// Input for editing a student's master data.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "nama wajib diisi"))]
    pub nama: String,
    #[validate(length(min = 1, message = "kelas wajib diisi"))]
    pub kelas: String,
    #[validate(length(min = 1, message = "NIS wajib diisi"))]
    pub nis: String,
    #[validate(length(min = 1, message = "NISN wajib diisi"))]
    pub nisn: String,
    #[serde(default)]
    pub alamat: String,
    #[serde(default)]
    pub nama_orang_tua: String,
    pub status: StudentStatus,
    #[validate(length(min = 9, max = 9, message = "tahun ajaran harus berformat YYYY/YYYY"))]
    pub tahun_ajaran: String,
}

/// One line of a replacement fee breakdown.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RincianItemInput {
    #[validate(length(min = 1, message = "nama biaya wajib diisi"))]
    pub nama_biaya: String,
    #[validate(range(min = 1, message = "jumlah harus positif"))]
    pub jumlah: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "terbayar tidak boleh negatif"))]
    pub terbayar: i64,
}
