//! nanoflow Producer Declarations
//!
//! Declarative producers mapping input quantities to output quantities
//! through a templated call into the physics library.
//!
//! # Core Concepts
//!
//! - [`Producer`]: plain, vector or group declaration, built with
//!   [`ProducerBuilder`]
//! - [`CallTemplate`]: call expression with `{placeholder}` slots
//! - [`ParamValue`] / [`ParamSource`]: run-configuration values
//!
//! # Example
//!
//! ```rust
//! use nanoflow_producer::{Expansion, ParamTable, ParamValue, Producer};
//! use nanoflow_quantity::{Quantity, Scope};
//!
//! let cut = Producer::builder("MuonPtCut")
//!     .call("physicsobject::CutPt({df}, {input}, {output}, {min_muon_pt})")
//!     .inputs([Quantity::nano_aod("Muon_pt")])
//!     .internal_output()
//!     .scopes(&["global"])
//!     .build();
//!
//! let mut params = ParamTable::new();
//! params.insert("min_muon_pt".into(), ParamValue::Int(20));
//!
//! let call = cut
//!     .render_call(&Scope::GLOBAL, "df0", &params, &Expansion::new())
//!     .unwrap();
//! assert_eq!(call, r#"physicsobject::CutPt(df0, "Muon_pt", "MuonPtCut_output", 20)"#);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod params;
mod producer;
mod template;

// Re-exports
pub use error::ProducerError;
pub use params::{ParamSource, ParamTable, ParamValue};
pub use producer::{
    Expansion, Inputs, Outputs, Producer, ProducerBuilder, ProducerKind, ProducerRef,
};
pub use template::{CallTemplate, RenderContext, TemplateError, BUILTIN_PLACEHOLDERS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
