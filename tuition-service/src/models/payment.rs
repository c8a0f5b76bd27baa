//! Parent-submitted payment instructions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Bca,
    Bri,
    Dana,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Bca => "BCA",
            PaymentMethod::Bri => "BRI",
            PaymentMethod::Dana => "DANA",
        }
    }
}

/// There is no gateway behind this; self-reported payments are auto-verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub siswa_id: String,
    pub nama_siswa: String,
    pub nis: String,
    pub kelas: String,
    pub jumlah_bayar: i64,
    pub metode_pembayaran: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomor_rekening: Option<String>,
    pub tanggal_pembayaran: NaiveDate,
    /// Wall-clock time of submission, "HH:MM:SS".
    pub waktu_pembayaran: String,
    pub status: VerificationStatus,
    pub nomor_kwitansi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama_orang_tua: Option<String>,
}

/// Parent self-service payment request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayment {
    #[validate(length(min = 1, message = "siswa wajib dipilih"))]
    pub siswa_id: String,
    #[validate(range(min = 1, message = "jumlah bayar harus positif"))]
    pub jumlah_bayar: i64,
    pub metode_pembayaran: PaymentMethod,
    #[serde(default)]
    pub nomor_rekening: Option<String>,
    #[serde(default)]
    pub nama_orang_tua: Option<String>,
}
