//! # agro-core: Pure Business Logic for Agro Finance
//!
//! This crate is the **heart** of the farm financial-management app. It
//! contains the calculation engine and the validators as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Agro Finance Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Screens (mobile / web)                          │   │
//! │  │   Dashboard ──► Seasons ──► Fields ──► Cash Flow ──► Clients    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain numbers, booleans, strings       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ agro-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌─────────────┐  ┌─────────────┐            │   │
//! │  │   │calculations │  │ validation  │  │    forms    │            │   │
//! │  │   │ margin, ROI │  │ CPF, CNPJ   │  │ SeasonForm  │            │   │
//! │  │   │ PMT, stock  │  │ email, NF-e │  │ ClientForm  │            │   │
//! │  │   └─────────────┘  └─────────────┘  └─────────────┘            │   │
//! │  │   ┌─────────────┐  ┌─────────────┐  ┌─────────────┐            │   │
//! │  │   │   budget    │  │  cash_flow  │  │   format    │            │   │
//! │  │   │  variance   │  │ projection  │  │ R$ 1.234,56 │            │   │
//! │  │   └─────────────┘  └─────────────┘  └─────────────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  agro-store (Persistence Layer)                 │   │
//! │  │        Per-entity JSON collections in SQLite, app config        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Financial formulas (margins, ROI, PMT, inventory, depreciation)
//! - [`validation`] - Boolean validators (documents, contact, values, dates)
//! - [`types`] - Domain types and closed status enums
//! - [`money`] - Integer centavo amounts for storage and display
//! - [`format`] - pt-BR formatting at the screen boundary
//! - [`budget`] - Season budget variance and field portfolio summaries
//! - [`cash_flow`] - Cash-flow balance projection
//! - [`forms`] - Typed form validation
//! - [`limits`] - Configurable policy limits
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output. Clock reads have `_at` variants
//! 2. **No I/O**: database, network and file system access is FORBIDDEN here
//! 3. **Sentinels, not errors**: a zero denominator yields 0 (or ∞ for break-even)
//! 4. **Locale at the edge**: formulas return `f64`; only [`format`] knows about `R$`
//!
//! ## Example Usage
//!
//! ```rust
//! use agro_core::calculations::{cost_per_hectare, funrural_default};
//! use agro_core::format::format_brl;
//! use agro_core::Money;
//!
//! let cost = cost_per_hectare(300_000.0, 150.0);
//! assert_eq!(cost, 2_000.0);
//!
//! let tax = Money::from_reais(funrural_default(100_000.0));
//! assert_eq!(format_brl(tax), "R$ 2.300,00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod budget;
pub mod calculations;
pub mod cash_flow;
pub mod error;
pub mod format;
pub mod forms;
pub mod limits;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use agro_core::Money` instead of
// `use agro_core::money::Money`

pub use error::{CoreError, CoreResult, FormErrors, ValidationError};
pub use limits::{TaxSettings, ValidationLimits};
pub use money::Money;
pub use types::*;
