//! Master catalog of administrative fee types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A fee type template, independent of any student. Used when itemizing a
/// student's rincian biaya.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiayaAdministrasi {
    pub id: String,
    pub nama: String,
    pub jumlah: i64,
    #[serde(default)]
    pub keterangan: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBiayaAdministrasi {
    #[validate(length(min = 1, message = "nama wajib diisi"))]
    pub nama: String,
    #[validate(range(min = 1, message = "jumlah harus positif"))]
    pub jumlah: i64,
    #[serde(default)]
    pub keterangan: String,
}
