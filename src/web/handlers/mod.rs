//! HTML handlers: main page, redirects and error pages.

mod errors;
mod index;
mod redirect;

pub use errors::{NotFoundTemplate, ServerErrorTemplate, not_found_handler};
pub use index::{IndexTemplate, create_link_form_handler, index_handler};
pub use redirect::redirect_handler;
