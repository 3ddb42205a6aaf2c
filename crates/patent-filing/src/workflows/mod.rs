pub mod drafting;
pub mod filing;
