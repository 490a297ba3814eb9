pub(crate) mod actions;
pub(crate) mod mount;
pub(crate) mod surface;
pub(crate) mod template;
pub(crate) mod widget;
