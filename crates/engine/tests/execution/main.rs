mod errors;
mod fixtures;
mod ordering;
mod selections;
