mod slab;

pub(crate) use slab::Slab;
