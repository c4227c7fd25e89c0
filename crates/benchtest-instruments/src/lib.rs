//! # Benchtest Instruments
//!
//! Thin adapters over vendor instrument drivers used on the bench.
//!
//! - [`pcu`]: Register search, read and write on a power-control unit, for
//!   live registers and data-model image (DMIR) regions
//! - [`scope`]: SCPI command formatting and reply parsing for an
//!   oscilloscope
//!
//! The vendor SDKs are reached through the [`pcu::PcuDriver`],
//! [`pcu::DatamodelProvider`] and [`scope::ScpiTransport`] traits; the adapters own a handle and expose
//! only the operations bench scripts use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod pcu;
pub mod scope;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{InstrumentError, InstrumentResult};
    pub use crate::pcu::{
        DatamodelProvider, DmirRegion, Pcu, PcuDriver, Register, RegisterMap, RegisterValue,
    };
    pub use crate::scope::{Axis, RunControl, Scope, ScpiTransport, TriggerSweep};
}

pub use error::{InstrumentError, InstrumentResult};
