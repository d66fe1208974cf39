pub(crate) mod matrix;
pub(crate) mod mesh;
pub(crate) mod obj;
pub(crate) mod triangle;
pub(crate) mod vec3;
