use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (leads, referral, ...) implements this trait to
/// register its API endpoints. The binary entry point collects all modules
/// and merges their routes into a single Router.
///
/// Module routers carry their full `/api/...` paths — the binary merges
/// them instead of nesting, because the public URL layout is fixed by the
/// frontend.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes with absolute paths.
    fn routes(&self) -> Router;
}
