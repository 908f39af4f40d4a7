pub mod local_factors;
pub mod phq9;
pub mod student;
