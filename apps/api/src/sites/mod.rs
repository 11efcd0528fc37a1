// Persistence of generated sites.
// Generation never waits on this module: sites are submitted, not awaited.

pub mod handlers;
pub mod store;
