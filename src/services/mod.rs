pub mod bmi;
pub mod day_window;
pub mod records;
