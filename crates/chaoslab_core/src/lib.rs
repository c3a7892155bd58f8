/// The `chaoslab_core` crate is the model-polymorphic configuration,
/// submission, and visualization state machine behind the Chaoslab UI.
/// Numerical integration happens on a remote compute service; this crate
/// treats it as an opaque collaborator and owns everything around it.
///
/// Key components:
/// - **Registry**: static table of supported models and their parameter schemas.
/// - **Form**: parameter form state, reset wholesale on model switches.
/// - **Validate**: free-form initial-condition text into a typed `RunRequest`.
/// - **Lifecycle**: the compose / history / detail view state machine, with
///   token-guarded fetch slots so stale responses never win.
/// - **Viz**: model-dependent projection modes over loaded trajectories.
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod params;
pub mod registry;
pub mod run;
pub mod validate;
pub mod viz;
