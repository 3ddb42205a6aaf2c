mod common;
mod context;
mod decoder;
mod rules;
