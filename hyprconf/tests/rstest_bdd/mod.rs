//! `rstest-bdd` scaffolding for `hyprconf`.
//!
//! Fixtures hold the configuration under test between steps, while the
//! behaviour module binds the `.feature` files under `tests/features` to the
//! step registry so the scenarios run under `cargo test`.

mod behaviour;
mod fixtures;
