pub mod home;
pub mod logging;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;
