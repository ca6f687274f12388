//! TutorHub observability: structured logging and Prometheus metrics.
//!
//! ```no_run
//! use tutorhub_observability::{init_logging, init_metrics};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_logging();
//!     let metrics = init_metrics();
//! }
//! ```
//!
//! The `track_*` helpers are no-ops until a recorder is installed, so tests
//! and tools that never call [`init_metrics`] pay nothing for them.

pub mod logging;
pub mod metrics;

pub use self::logging::{init_logging, logging_middleware};
pub use self::metrics::{
    init_metrics, metrics_middleware, metrics_router, track_course_created,
    track_jwt_issued, track_login_failure, track_login_success, track_thumbnail_compensation,
    track_user_registered,
};
pub use metrics_exporter_prometheus::PrometheusHandle;
