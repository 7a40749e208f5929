//! Admin client controllers
//!
//! The dashboard's behaviour without its markup: the ordered list with
//! drag-and-drop, the create/edit forms and toast notifications.

pub mod forms;
pub mod gateway;
pub mod notify;
pub mod reorder;

pub use forms::{CreateArtworkForm, EditArtworkForm, ImagePreview, Navigation};
pub use gateway::ArtworkGateway;
pub use notify::{Notifier, Toast, ToastKind};
pub use reorder::{DragOutcome, GalleryAdmin};
