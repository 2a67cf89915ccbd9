//! Build script for the embedded SQL migrations.
//!
//! `sqlx::migrate!` embeds `data/sql/sqlite` at compile time, so a new or
//! edited migration must trigger a rebuild.

fn main() {
    println!("cargo:rerun-if-changed=data/sql/sqlite");
}
