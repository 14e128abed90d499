pub mod error;
pub mod graph;
pub mod ids;
pub mod issue;
pub mod term;
pub mod vocab;

pub use error::{ModelError, Result};
pub use graph::{Graph, Triple};
pub use ids::{RecordId, ReificationId, ReificationReason, resource_iri};
pub use issue::{ErrorLog, ErrorRecord};
pub use term::{Datatype, Iri, Literal, Term};
pub use vocab::{Namespace, attr};
