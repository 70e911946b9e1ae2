pub mod ats_import;
pub mod recruiting;
