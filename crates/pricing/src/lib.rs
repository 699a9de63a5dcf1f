//! `rxstock-pricing` — supplier price quotes.
//!
//! Quoting sits behind the [`QuoteProvider`] trait so the simulated pricing
//! used in development can later be swapped for a real pricing service
//! without touching store or API code.

pub mod provider;
pub mod quote;

pub use provider::{QuoteProvider, SimulatedQuoteProvider};
pub use quote::{round_to_cents, SupplierQuote};
