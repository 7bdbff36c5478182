//! Service layer: external collaborators and background work

pub mod crm;
pub mod enrichment;
pub mod nationalize;
pub mod sync;
