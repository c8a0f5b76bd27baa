//! School and administrator profiles, echoed onto receipts and reports.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilSekolah {
    pub nama_sekolah: String,
    pub alamat: String,
    pub telepon: String,
    pub email: String,
    pub kepala_sekolah: String,
    pub kepala_tata_usaha: String,
}

impl Default for ProfilSekolah {
    fn default() -> Self {
        Self {
            nama_sekolah: "SMK AL-ISHLAH CISAUK".to_string(),
            alamat: "Jl. Raya Cisauk No. 123, Cisauk, Tangerang".to_string(),
            telepon: "(021) 7564-8900".to_string(),
            email: "info@smkalishlah.sch.id".to_string(),
            kepala_sekolah: "Drs. H. Ahmad Fauzi, M.Pd".to_string(),
            kepala_tata_usaha: "Siti Nurjanah, S.Pd".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilAdmin {
    pub nama: String,
    pub alamat: String,
    pub email: String,
}

impl Default for ProfilAdmin {
    fn default() -> Self {
        Self {
            nama: "Administrator".to_string(),
            alamat: "Jl. Merpati No. 45, Cisauk, Tangerang".to_string(),
            email: "admin@smkalishlah.sch.id".to_string(),
        }
    }
}
