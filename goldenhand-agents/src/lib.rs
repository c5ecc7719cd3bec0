//! Specialized subject agents for The Golden Hand learning platform.
//!
//! Three builtin agents (mathematics, science, technology) sit behind a
//! registry and factory; the [`AgentIntegrator`] routes learning paths,
//! content generation, performance analysis, questions, resources and
//! entrepreneurship connections to them, and is what the web layer holds.

pub mod agents;
pub mod error;
pub mod factory;
pub mod integrator;
pub mod registry;
pub mod types;

pub use error::AgentError;
pub use factory::AgentFactory;
pub use integrator::AgentIntegrator;
pub use registry::{AgentRegistry, SubjectAgent};
