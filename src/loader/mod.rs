pub(crate) mod bounds;
pub(crate) mod content;
pub(crate) mod fetch;
pub(crate) mod fonts;
pub(crate) mod image;
pub(crate) mod markup;
pub(crate) mod sanitize;
pub(crate) mod svg;
