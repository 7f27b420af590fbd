//! Number engine behind a lottery bet slip.
//!
//! Everything in [`slip`] is synchronous and free of I/O apart from the CSV loaders. The one
//! stateful piece, the [`slip::Slip`], belongs to whoever created it.
pub mod slip;
