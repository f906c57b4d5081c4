#[path = "support/mod.rs"]
mod support;

#[path = "grammar/mod.rs"]
mod grammar;
