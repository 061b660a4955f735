pub mod dataset_record;
pub mod persona;
pub mod session;
pub use dataset_record::DatasetRecord;
pub use persona::{Demographic, Persona};
pub use session::{ApiMessage, ChatMessage, Role, Session};
