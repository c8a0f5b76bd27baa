//! Generic income/expense ledger entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Pemasukan,
    Pengeluaran,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Pemasukan => "Pemasukan",
            TransactionType::Pengeluaran => "Pengeluaran",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger entry. Fee payments carry a link to the paying student so their
/// deletion can roll the amount back off the student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub tipe: TransactionType,
    pub kategori: String,
    pub jumlah: i64,
    pub tanggal: NaiveDate,
    /// Wall-clock time of entry, "HH:MM:SS".
    pub waktu: String,
    #[serde(default)]
    pub keterangan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siswa_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama_siswa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kelas: Option<String>,
}

/// Input for recording an income or expense entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub tipe: TransactionType,
    #[validate(length(min = 1, message = "kategori wajib diisi"))]
    pub kategori: String,
    #[validate(range(min = 1, message = "jumlah harus positif"))]
    pub jumlah: i64,
    pub tanggal: NaiveDate,
    #[serde(default)]
    pub keterangan: String,
    /// Only meaningful for Pemasukan: links the income to a student and
    /// applies it against the student's outstanding fees.
    #[serde(default)]
    pub siswa_id: Option<String>,
}
