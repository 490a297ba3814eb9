pub(crate) mod directive;
pub(crate) mod image;
pub(crate) mod viewport;
pub(crate) mod zoom_pan;
