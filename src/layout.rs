pub(crate) mod crop;
pub(crate) mod metrics;
pub(crate) mod shift;
