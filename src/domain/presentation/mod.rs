pub mod ports;
pub mod value_objects;

pub use ports::{Localizer, Navigator, Notifier};
pub use value_objects::{Language, Notification, NotificationVariant, Route, UnsupportedLanguage};
