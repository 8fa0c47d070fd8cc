mod common;

mod concurrency;
mod secret_masking;
mod size_gate;
mod strategy_equivalence;
