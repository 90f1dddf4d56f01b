pub mod date_range;
pub mod outcome;
pub mod sensor;
pub mod series;
