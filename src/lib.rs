//! Setup library for the Spotr terminal Spotify controller.
//!
//! Two collaborating components: [`installer`] materializes the
//! application on disk and [`auth`] owns the persisted configuration and
//! the OAuth flows. [`wizard`] and [`runners`] are the terminal front-end
//! gluing the two together.

pub mod auth;
pub mod installer;
pub mod runners;
pub mod wizard;
