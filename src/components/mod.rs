//! UI Components

mod toast;

pub use toast::ToastHost;
