//! Snapshot store: one JSON file per collection under a data directory,
//! mirroring the original per-key local-storage layout. State lives in
//! memory behind a lock; every mutation rewrites the affected collection
//! file whole, so writes are last-write-wins at collection granularity.

use crate::fees::{calendar, reconcile, report};
use crate::models::{
    BiayaAdministrasi, BiayaItem, CreateBiayaAdministrasi, CreateSppPayment, CreateStudent,
    CreateTransaction, InfaqRates, Payment, PaymentMethod, ProfilAdmin, ProfilSekolah,
    RincianItemInput, SppBulanan, SppStatus, Student, SubmitPayment, Transaction, TransactionType,
    UpdateSppPayment, UpdateStudent, VerificationStatus,
};
use crate::services::metrics;
use anyhow::anyhow;
use chrono::Local;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

const STUDENTS_FILE: &str = "students.json";
const BIAYA_FILE: &str = "biaya_administrasi.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const SPP_FILE: &str = "spp_bulanan.json";
const PAYMENTS_FILE: &str = "payments.json";
const PENGATURAN_FILE: &str = "pengaturan.json";

/// Settings snapshot: default monthly rates plus the two profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pengaturan {
    #[serde(default)]
    pub nominal_infaq: InfaqRates,
    #[serde(default)]
    pub profil_sekolah: ProfilSekolah,
    #[serde(default)]
    pub profil_admin: ProfilAdmin,
}

#[derive(Debug, Default)]
struct AppData {
    students: Vec<Student>,
    biaya_administrasi: Vec<BiayaAdministrasi>,
    transactions: Vec<Transaction>,
    spp_bulanan: Vec<SppBulanan>,
    payments: Vec<Payment>,
    pengaturan: Pengaturan,
}

/// A student's twelve-month SPP view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SppMonthView {
    pub siswa: Student,
    pub nominal_per_bulan: i64,
    pub bulan: Vec<calendar::MonthSlot>,
    pub ringkasan: calendar::SppSummary,
}

/// Receipt payload for a verified payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub pembayaran: Payment,
    pub siswa: Student,
    pub profil_sekolah: ProfilSekolah,
}

/// Dashboard rollup: fee recap plus cashflow windows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub rekap: report::PaymentRecap,
    pub kas_harian: report::CashflowSummary,
    pub kas_bulanan: report::CashflowSummary,
    pub kas_tahunan: report::CashflowSummary,
    pub kas_total: report::CashflowSummary,
    pub jumlah_transaksi: usize,
}

pub struct Store {
    data_dir: PathBuf,
    state: RwLock<AppData>,
}

async fn read_collection<T>(path: &Path) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Store {
    /// Open (or initialize) the snapshot directory and load every collection.
    #[instrument(skip(data_dir))]
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut students: Vec<Student> =
            read_collection(&data_dir.join(STUDENTS_FILE)).await?;
        // Old snapshots may carry stale aggregates or a missing breakdown;
        // the breakdown is authoritative, so rederive on load.
        for student in &mut students {
            student.refresh_totals();
        }

        let data = AppData {
            students,
            biaya_administrasi: read_collection(&data_dir.join(BIAYA_FILE)).await?,
            transactions: read_collection(&data_dir.join(TRANSACTIONS_FILE)).await?,
            spp_bulanan: read_collection(&data_dir.join(SPP_FILE)).await?,
            payments: read_collection(&data_dir.join(PAYMENTS_FILE)).await?,
            pengaturan: read_collection(&data_dir.join(PENGATURAN_FILE)).await?,
        };

        info!(
            data_dir = %data_dir.display(),
            students = data.students.len(),
            transactions = data.transactions.len(),
            "Snapshot store loaded"
        );

        Ok(Self {
            data_dir,
            state: RwLock::new(data),
        })
    }

    /// The store is healthy when the data directory is still there.
    pub async fn health_check(&self) -> Result<(), AppError> {
        tokio::fs::metadata(&self.data_dir)
            .await
            .map_err(|e| AppError::StorageError(anyhow!("data directory unavailable: {e}")))?;
        Ok(())
    }

    async fn write_collection<T: Serialize>(
        &self,
        file: &str,
        collection: &T,
    ) -> Result<(), AppError> {
        let start = Instant::now();
        let bytes = serde_json::to_vec_pretty(collection)?;
        tokio::fs::write(self.data_dir.join(file), bytes).await?;
        metrics::observe_store_write(file, start.elapsed().as_secs_f64());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Students
    // -------------------------------------------------------------------------

    pub async fn list_students(&self) -> Vec<Student> {
        self.state.read().await.students.clone()
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, AppError> {
        self.state
            .read()
            .await
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(anyhow!("Siswa '{id}' tidak ditemukan")))
    }

    /// Parent-facing lookup: exact NIS or NISN, or a name fragment.
    pub async fn lookup_student(&self, query: &str) -> Option<Student> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }
        self.state
            .read()
            .await
            .students
            .iter()
            .find(|s| {
                s.nis.to_lowercase() == q
                    || s.nisn.to_lowercase() == q
                    || s.nama.to_lowercase().contains(&q)
            })
            .cloned()
    }

    #[instrument(skip(self, input), fields(nis = %input.nis))]
    pub async fn create_student(&self, input: CreateStudent) -> Result<Student, AppError> {
        calendar::AcademicYear::parse(&input.tahun_ajaran)
            .map_err(|e| AppError::BadRequest(anyhow!(e)))?;

        let mut state = self.state.write().await;
        if state.students.iter().any(|s| s.nis == input.nis) {
            return Err(AppError::Conflict(anyhow!(
                "Siswa dengan NIS '{}' sudah terdaftar",
                input.nis
            )));
        }

        let student = Student {
            id: format!("SIS-{}", Uuid::new_v4()),
            nama: input.nama,
            kelas: input.kelas,
            nis: input.nis,
            nisn: input.nisn,
            alamat: input.alamat,
            nama_orang_tua: input.nama_orang_tua,
            status: input.status,
            tahun_ajaran: input.tahun_ajaran,
            total_biaya: 0,
            terbayar: 0,
            tunggakan: 0,
            rincian_biaya: vec![],
        };

        state.students.push(student.clone());
        self.write_collection(STUDENTS_FILE, &state.students).await?;

        info!(student_id = %student.id, "Student registered");
        Ok(student)
    }

    #[instrument(skip(self, input))]
    pub async fn update_student(
        &self,
        id: &str,
        input: UpdateStudent,
    ) -> Result<Student, AppError> {
        calendar::AcademicYear::parse(&input.tahun_ajaran)
            .map_err(|e| AppError::BadRequest(anyhow!(e)))?;

        let mut state = self.state.write().await;
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(anyhow!("Siswa '{id}' tidak ditemukan")))?;

        student.nama = input.nama;
        student.kelas = input.kelas;
        student.nis = input.nis;
        student.nisn = input.nisn;
        student.alamat = input.alamat;
        student.nama_orang_tua = input.nama_orang_tua;
        student.status = input.status;
        student.tahun_ajaran = input.tahun_ajaran;

        let updated = student.clone();
        self.write_collection(STUDENTS_FILE, &state.students).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let before = state.students.len();
        state.students.retain(|s| s.id != id);
        if state.students.len() == before {
            return Err(AppError::NotFound(anyhow!("Siswa '{id}' tidak ditemukan")));
        }
        self.write_collection(STUDENTS_FILE, &state.students).await?;
        info!(student_id = %id, "Student deleted");
        Ok(())
    }

    /// Replace a student's fee breakdown. Aggregates are rederived, never
    /// taken from the caller.
    #[instrument(skip(self, items))]
    pub async fn replace_rincian(
        &self,
        id: &str,
        items: Vec<RincianItemInput>,
    ) -> Result<Student, AppError> {
        for item in &items {
            if item.terbayar > item.jumlah {
                return Err(AppError::BadRequest(anyhow!(
                    "Terbayar untuk '{}' melebihi jumlah biaya",
                    item.nama_biaya
                )));
            }
        }

        let mut state = self.state.write().await;
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(anyhow!("Siswa '{id}' tidak ditemukan")))?;

        student.rincian_biaya = items
            .into_iter()
            .map(|item| BiayaItem::new(item.nama_biaya, item.jumlah, item.terbayar))
            .collect();
        student.refresh_totals();

        let updated = student.clone();
        self.write_collection(STUDENTS_FILE, &state.students).await?;
        Ok(updated)
    }

    // -------------------------------------------------------------------------
    // Fee catalog
    // -------------------------------------------------------------------------

    pub async fn list_biaya(&self) -> Vec<BiayaAdministrasi> {
        self.state.read().await.biaya_administrasi.clone()
    }

    #[instrument(skip(self, input))]
    pub async fn create_biaya(
        &self,
        input: CreateBiayaAdministrasi,
    ) -> Result<BiayaAdministrasi, AppError> {
        let mut state = self.state.write().await;
        let entry = BiayaAdministrasi {
            id: format!("BA-{}", Uuid::new_v4()),
            nama: input.nama,
            jumlah: input.jumlah,
            keterangan: input.keterangan,
        };
        state.biaya_administrasi.push(entry.clone());
        self.write_collection(BIAYA_FILE, &state.biaya_administrasi)
            .await?;
        Ok(entry)
    }

    #[instrument(skip(self, input))]
    pub async fn update_biaya(
        &self,
        id: &str,
        input: CreateBiayaAdministrasi,
    ) -> Result<BiayaAdministrasi, AppError> {
        let mut state = self.state.write().await;
        let entry = state
            .biaya_administrasi
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(anyhow!("Jenis biaya '{id}' tidak ditemukan")))?;
        entry.nama = input.nama;
        entry.jumlah = input.jumlah;
        entry.keterangan = input.keterangan;
        let updated = entry.clone();
        self.write_collection(BIAYA_FILE, &state.biaya_administrasi)
            .await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_biaya(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let before = state.biaya_administrasi.len();
        state.biaya_administrasi.retain(|b| b.id != id);
        if state.biaya_administrasi.len() == before {
            return Err(AppError::NotFound(anyhow!(
                "Jenis biaya '{id}' tidak ditemukan"
            )));
        }
        self.write_collection(BIAYA_FILE, &state.biaya_administrasi)
            .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Monthly dues (SPP)
    // -------------------------------------------------------------------------

    pub async fn list_spp(&self, siswa_id: Option<&str>) -> Vec<SppBulanan> {
        let state = self.state.read().await;
        match siswa_id {
            Some(id) => state
                .spp_bulanan
                .iter()
                .filter(|row| row.siswa_id == id)
                .cloned()
                .collect(),
            None => state.spp_bulanan.clone(),
        }
    }

    /// The twelve-month view for one student, synthesizing unrecorded months
    /// at the standing rate.
    pub async fn spp_month_view(&self, siswa_id: &str) -> Result<SppMonthView, AppError> {
        let state = self.state.read().await;
        let student = state
            .students
            .iter()
            .find(|s| s.id == siswa_id)
            .ok_or_else(|| AppError::NotFound(anyhow!("Siswa '{siswa_id}' tidak ditemukan")))?;

        let rates = state.pengaturan.nominal_infaq;
        let slots = calendar::month_slots(student, &state.spp_bulanan, &rates)
            .map_err(|e| AppError::BadRequest(anyhow!(e)))?;
        let ringkasan = calendar::summarize(&slots);

        Ok(SppMonthView {
            siswa: student.clone(),
            nominal_per_bulan: rates.for_status(student.status),
            bulan: slots,
            ringkasan,
        })
    }

    /// Record one month's SPP payment and the matching income entry. The SPP
    /// ledger is separate from the rincian biaya ledger; each stays
    /// internally consistent.
    #[instrument(skip(self, input), fields(siswa_id = %input.siswa_id, bulan = %input.bulan))]
    pub async fn record_spp_payment(
        &self,
        input: CreateSppPayment,
    ) -> Result<SppBulanan, AppError> {
        let mut state = self.state.write().await;
        let student = state
            .students
            .iter()
            .find(|s| s.id == input.siswa_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(anyhow!("Siswa '{}' tidak ditemukan", input.siswa_id))
            })?;

        let duplicate = state.spp_bulanan.iter().any(|row| {
            row.siswa_id == student.id
                && row.bulan == input.bulan
                && row.tahun_ajaran == student.tahun_ajaran
        });
        if duplicate {
            return Err(AppError::Conflict(anyhow!(
                "Pembayaran untuk {} {} sudah ada",
                calendar::month_name(&input.bulan).unwrap_or("bulan tersebut"),
                student.tahun_ajaran
            )));
        }

        let mut row = SppBulanan {
            id: format!("SPP-{}", Uuid::new_v4()),
            siswa_id: student.id.clone(),
            nama_siswa: student.nama.clone(),
            nis: student.nis.clone(),
            kelas: student.kelas.clone(),
            status: student.status,
            bulan: input.bulan.clone(),
            tahun_ajaran: student.tahun_ajaran.clone(),
            jumlah_spp: input.nominal,
            terbayar: input.nominal,
            tunggakan: 0,
            status_pembayaran: SppStatus::Lunas,
            tanggal_bayar: Some(input.tanggal_bayar),
            keterangan: input.keterangan.clone(),
        };
        row.rederive();

        let bulan_label = format!(
            "{} {}",
            calendar::month_name(&input.bulan).unwrap_or_default(),
            student.tahun_ajaran
        );
        let transaction = Transaction {
            id: format!("TRX-{}", Uuid::new_v4()),
            tipe: TransactionType::Pemasukan,
            kategori: format!("SPP {} - {}", student.status, bulan_label),
            jumlah: input.nominal,
            tanggal: input.tanggal_bayar,
            waktu: Local::now().format("%H:%M:%S").to_string(),
            keterangan: input
                .keterangan
                .unwrap_or_else(|| format!("Pembayaran SPP {bulan_label}")),
            siswa_id: Some(student.id.clone()),
            nama_siswa: Some(student.nama.clone()),
            nis: Some(student.nis.clone()),
            kelas: Some(student.kelas.clone()),
        };

        state.spp_bulanan.push(row.clone());
        state.transactions.push(transaction);
        self.write_collection(SPP_FILE, &state.spp_bulanan).await?;
        self.write_collection(TRANSACTIONS_FILE, &state.transactions)
            .await?;

        metrics::record_payment("spp");
        info!(spp_id = %row.id, "SPP payment recorded");
        Ok(row)
    }

    #[instrument(skip(self, input))]
    pub async fn update_spp_payment(
        &self,
        id: &str,
        input: UpdateSppPayment,
    ) -> Result<SppBulanan, AppError> {
        let mut state = self.state.write().await;
        let row = state
            .spp_bulanan
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| AppError::NotFound(anyhow!("Pembayaran SPP '{id}' tidak ditemukan")))?;

        row.bulan = input.bulan;
        row.jumlah_spp = input.nominal;
        row.terbayar = input.terbayar;
        row.tanggal_bayar = input.tanggal_bayar;
        row.keterangan = input.keterangan;
        row.rederive();

        let updated = row.clone();
        self.write_collection(SPP_FILE, &state.spp_bulanan).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_spp_payment(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let before = state.spp_bulanan.len();
        state.spp_bulanan.retain(|row| row.id != id);
        if state.spp_bulanan.len() == before {
            return Err(AppError::NotFound(anyhow!(
                "Pembayaran SPP '{id}' tidak ditemukan"
            )));
        }
        self.write_collection(SPP_FILE, &state.spp_bulanan).await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.state.read().await.transactions.clone()
    }

    /// Record an income or expense entry. A student-linked income is also
    /// applied against the student's outstanding fees.
    #[instrument(skip(self, input), fields(tipe = %input.tipe))]
    pub async fn add_transaction(&self, input: CreateTransaction) -> Result<Transaction, AppError> {
        let mut state = self.state.write().await;

        let mut transaction = Transaction {
            id: format!("TRX-{}", Uuid::new_v4()),
            tipe: input.tipe,
            kategori: input.kategori,
            jumlah: input.jumlah,
            tanggal: input.tanggal,
            waktu: Local::now().format("%H:%M:%S").to_string(),
            keterangan: input.keterangan,
            siswa_id: None,
            nama_siswa: None,
            nis: None,
            kelas: None,
        };

        let mut students_dirty = false;
        if input.tipe == TransactionType::Pemasukan {
            if let Some(siswa_id) = input.siswa_id.filter(|id| !id.is_empty()) {
                let student = state
                    .students
                    .iter_mut()
                    .find(|s| s.id == siswa_id)
                    .ok_or_else(|| {
                        AppError::NotFound(anyhow!("Siswa '{siswa_id}' tidak ditemukan"))
                    })?;
                reconcile::apply_payment(student, input.jumlah);
                transaction.siswa_id = Some(student.id.clone());
                transaction.nama_siswa = Some(student.nama.clone());
                transaction.nis = Some(student.nis.clone());
                transaction.kelas = Some(student.kelas.clone());
                students_dirty = true;
            }
        }

        state.transactions.push(transaction.clone());
        if students_dirty {
            self.write_collection(STUDENTS_FILE, &state.students).await?;
            metrics::record_payment("manual");
        }
        self.write_collection(TRANSACTIONS_FILE, &state.transactions)
            .await?;

        Ok(transaction)
    }

    /// Delete an entry. A student-linked income is rolled back off the
    /// student before removal.
    #[instrument(skip(self))]
    pub async fn delete_transaction(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let position = state
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(anyhow!("Transaksi '{id}' tidak ditemukan")))?;

        let transaction = state.transactions.remove(position);

        let mut students_dirty = false;
        if transaction.tipe == TransactionType::Pemasukan {
            if let Some(siswa_id) = &transaction.siswa_id {
                if let Some(student) = state.students.iter_mut().find(|s| &s.id == siswa_id) {
                    reconcile::rollback_payment(student, transaction.jumlah);
                    students_dirty = true;
                }
            }
        }

        if students_dirty {
            self.write_collection(STUDENTS_FILE, &state.students).await?;
        }
        self.write_collection(TRANSACTIONS_FILE, &state.transactions)
            .await?;
        info!(transaction_id = %id, "Transaction deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Parent payments
    // -------------------------------------------------------------------------

    /// Parent self-service payment: allocated across the fee breakdown,
    /// auto-verified, receipted, and mirrored into the transaction ledger.
    #[instrument(skip(self, input), fields(siswa_id = %input.siswa_id))]
    pub async fn submit_payment(&self, input: SubmitPayment) -> Result<Receipt, AppError> {
        let mut state = self.state.write().await;
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == input.siswa_id)
            .ok_or_else(|| {
                AppError::NotFound(anyhow!("Siswa '{}' tidak ditemukan", input.siswa_id))
            })?;

        let applied = reconcile::apply_payment(student, input.jumlah_bayar);
        let student_snapshot = student.clone();
        let now = Local::now();

        let payment = Payment {
            id: format!("PAY-{}", Uuid::new_v4()),
            siswa_id: student_snapshot.id.clone(),
            nama_siswa: student_snapshot.nama.clone(),
            nis: student_snapshot.nis.clone(),
            kelas: student_snapshot.kelas.clone(),
            jumlah_bayar: input.jumlah_bayar,
            metode_pembayaran: input.metode_pembayaran,
            nomor_rekening: input.nomor_rekening,
            tanggal_pembayaran: now.date_naive(),
            waktu_pembayaran: now.format("%H:%M:%S").to_string(),
            status: VerificationStatus::Verified,
            nomor_kwitansi: generate_nomor_kwitansi(input.metode_pembayaran),
            nama_orang_tua: input.nama_orang_tua.clone(),
        };

        let transaction = Transaction {
            id: format!("TRX-{}", Uuid::new_v4()),
            tipe: TransactionType::Pemasukan,
            kategori: "Pembayaran Biaya Sekolah".to_string(),
            jumlah: input.jumlah_bayar,
            tanggal: payment.tanggal_pembayaran,
            waktu: payment.waktu_pembayaran.clone(),
            keterangan: format!(
                "Pembayaran dari {} untuk siswa {} ({}) via {}",
                input.nama_orang_tua.as_deref().unwrap_or("wali"),
                student_snapshot.nama,
                student_snapshot.kelas,
                input.metode_pembayaran.as_str()
            ),
            siswa_id: Some(student_snapshot.id.clone()),
            nama_siswa: Some(student_snapshot.nama.clone()),
            nis: Some(student_snapshot.nis.clone()),
            kelas: Some(student_snapshot.kelas.clone()),
        };

        state.payments.push(payment.clone());
        state.transactions.push(transaction);
        self.write_collection(STUDENTS_FILE, &state.students).await?;
        self.write_collection(PAYMENTS_FILE, &state.payments).await?;
        self.write_collection(TRANSACTIONS_FILE, &state.transactions)
            .await?;

        metrics::record_payment("parent");
        info!(
            payment_id = %payment.id,
            applied = applied.applied,
            remainder = applied.remainder,
            "Parent payment verified"
        );

        Ok(Receipt {
            pembayaran: payment,
            siswa: student_snapshot,
            profil_sekolah: state.pengaturan.profil_sekolah.clone(),
        })
    }

    pub async fn get_receipt(&self, payment_id: &str) -> Result<Receipt, AppError> {
        let state = self.state.read().await;
        let payment = state
            .payments
            .iter()
            .find(|p| p.id == payment_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(anyhow!("Pembayaran '{payment_id}' tidak ditemukan"))
            })?;
        let siswa = state
            .students
            .iter()
            .find(|s| s.id == payment.siswa_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(anyhow!("Siswa '{}' tidak ditemukan", payment.siswa_id))
            })?;

        Ok(Receipt {
            pembayaran: payment,
            siswa,
            profil_sekolah: state.pengaturan.profil_sekolah.clone(),
        })
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    pub async fn get_rates(&self) -> InfaqRates {
        self.state.read().await.pengaturan.nominal_infaq
    }

    #[instrument(skip(self))]
    pub async fn set_rates(&self, rates: InfaqRates) -> Result<InfaqRates, AppError> {
        if rates.mukim <= 0 || rates.non_mukim <= 0 {
            return Err(AppError::BadRequest(anyhow!(
                "Nominal infaq harus berupa angka positif"
            )));
        }
        let mut state = self.state.write().await;
        state.pengaturan.nominal_infaq = rates;
        self.write_collection(PENGATURAN_FILE, &state.pengaturan)
            .await?;
        Ok(rates)
    }

    pub async fn get_profil_sekolah(&self) -> ProfilSekolah {
        self.state.read().await.pengaturan.profil_sekolah.clone()
    }

    #[instrument(skip(self, profil))]
    pub async fn set_profil_sekolah(&self, profil: ProfilSekolah) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.pengaturan.profil_sekolah = profil;
        self.write_collection(PENGATURAN_FILE, &state.pengaturan)
            .await?;
        Ok(())
    }

    pub async fn get_profil_admin(&self) -> ProfilAdmin {
        self.state.read().await.pengaturan.profil_admin.clone()
    }

    #[instrument(skip(self, profil))]
    pub async fn set_profil_admin(&self, profil: ProfilAdmin) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.pengaturan.profil_admin = profil;
        self.write_collection(PENGATURAN_FILE, &state.pengaturan)
            .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    pub async fn dashboard(&self) -> DashboardSummary {
        let state = self.state.read().await;
        let students: Vec<&Student> = state.students.iter().collect();
        let today = Local::now().date_naive();

        DashboardSummary {
            rekap: report::payment_recap(&students),
            kas_harian: report::cashflow(&state.transactions, report::CashflowPeriod::Harian, today),
            kas_bulanan: report::cashflow(
                &state.transactions,
                report::CashflowPeriod::Bulanan,
                today,
            ),
            kas_tahunan: report::cashflow(
                &state.transactions,
                report::CashflowPeriod::Tahunan,
                today,
            ),
            kas_total: report::cashflow(&state.transactions, report::CashflowPeriod::Semua, today),
            jumlah_transaksi: state.transactions.len(),
        }
    }

    pub async fn rekap(
        &self,
        filter: &report::StudentFilter,
    ) -> (Vec<Student>, report::PaymentRecap) {
        let state = self.state.read().await;
        let filtered = filter.apply(&state.students);
        let recap = report::payment_recap(&filtered);
        (filtered.into_iter().cloned().collect(), recap)
    }

    pub async fn spp_recap(
        &self,
        filter: &report::StudentFilter,
    ) -> (Vec<report::SppRecapRow>, report::SppRecapTotals) {
        let state = self.state.read().await;
        let filtered = filter.apply(&state.students);
        report::spp_recap(&filtered, &state.spp_bulanan, &state.pengaturan.nominal_infaq)
    }

    pub async fn rekap_csv(&self, filter: &report::StudentFilter) -> Result<String, AppError> {
        let state = self.state.read().await;
        let filtered = filter.apply(&state.students);
        report::rekap_csv(&filtered).map_err(|e| AppError::InternalError(anyhow!(e)))
    }
}

fn generate_nomor_kwitansi(method: PaymentMethod) -> String {
    let today = Local::now().format("%Y%m%d");
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "KWT/{today}/{}-{}",
        method.as_str(),
        &suffix[..6].to_uppercase()
    )
}
