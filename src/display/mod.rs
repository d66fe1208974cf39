pub(crate) mod canvas;
pub(crate) mod drawable;
pub(crate) mod order;
pub(crate) mod sink;
pub(crate) mod store;
