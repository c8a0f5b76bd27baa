mod biaya;
mod payment;
mod profile;
mod spp;
mod student;
mod transaction;

pub use biaya::*;
pub use payment::*;
pub use profile::*;
pub use spp::*;
pub use student::*;
pub use transaction::*;
