//! Charts module - Pie chart data

mod pie;

pub use pie::{PieChart, PieSlice, Rgb, SliceColor, DONUT_HOLE};
