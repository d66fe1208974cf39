pub(crate) mod animate;
pub(crate) mod shape;
