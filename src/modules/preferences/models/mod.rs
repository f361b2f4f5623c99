pub mod view_preference;

pub use view_preference::ViewPreference;
