pub mod appointment;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod pet;
pub mod service;
pub mod wizard;

pub use appointment::{Appointment, AppointmentRequest, AppointmentStatus};
pub use catalog::{Catalogs, CatalogError, TimeSlot};
pub use contact::{ContactField, ContactForm, Validation, ValidationErrors};
pub use content::{RemoteContent, SiteContent};
pub use pet::{PetOption, PetType};
pub use service::{ServiceOption, ServiceType};
pub use wizard::{Step, WizardState};
