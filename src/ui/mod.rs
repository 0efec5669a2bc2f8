//! egui rendering: panels around the page, the three pages, and the
//! widgets they share.

pub mod pages;
pub mod panels;
pub mod plot;
pub mod widgets;
