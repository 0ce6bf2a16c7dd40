//! nanoflow Quantity System
//!
//! Named per-event columns and the analysis scopes they live in.
//!
//! # Overview
//!
//! - **Quantity**: a column name plus its [`QuantityKind`]
//! - **Scope**: an analysis-channel label (`global`, `mt`, `et`, ...)
//! - **QuantityIndex**: which producer writes which quantity, per scope
//!
//! # Example
//!
//! ```rust
//! use nanoflow_quantity::{Quantity, QuantityIndex, Scope};
//!
//! const MUON_PT: Quantity = Quantity::nano_aod("Muon_pt");
//! let mask = Quantity::derived("base_muons_mask");
//!
//! let mut index = QuantityIndex::new();
//! index.claim(&Scope::GLOBAL, &mask, "BaseMuons").unwrap();
//!
//! let mt = Scope::new("mt");
//! assert!(index.is_available(&mt, &MUON_PT));
//! assert!(index.is_available(&mt, &mask));
//! ```

#![warn(missing_docs)]

pub mod index;
pub mod quantity;
pub mod scope;

// Re-exports
pub use index::{QuantityError, QuantityIndex};
pub use quantity::{Quantity, QuantityKind};
pub use scope::{Scope, ScopeSet};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for quantity operations
    pub use crate::{Quantity, QuantityError, QuantityIndex, QuantityKind, Scope, ScopeSet};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
