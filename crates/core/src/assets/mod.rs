//! Static asset reference data.

mod sectors;

pub use sectors::sector_for_ticker;
