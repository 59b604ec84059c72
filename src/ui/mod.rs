//! egui rendering of [`Figure`](crate::figure::Figure)s.

pub mod confusion;
pub mod panels;
pub mod plot;
