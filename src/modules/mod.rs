pub mod movies;

use std::sync::Arc;

use marquee_db::Database;
use marquee_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) {
    let store = Arc::new(movies::SqliteMovieStore::new(db.clone()));
    registry.register_custom(movies::create_module(store));
}
