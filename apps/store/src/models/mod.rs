pub mod contact;
pub mod resume;

pub use contact::ContactType;
pub use resume::Resume;
