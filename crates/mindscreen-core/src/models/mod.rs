pub mod kind;
pub mod news;
pub mod prediction;
pub mod recommendation;
