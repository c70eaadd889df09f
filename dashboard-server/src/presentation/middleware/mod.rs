pub(crate) mod cors;
pub(crate) mod route_guard;
pub(crate) mod trace;
